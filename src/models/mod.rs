pub mod datum;
pub mod datum_kind;
pub mod log_entry;
pub mod value;
