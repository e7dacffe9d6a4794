//! Assigned simple values.
//!
//! Codes 0-19 and 24-255 are unassigned or reserved but are still carried
//! through decode and encode unchanged.

/// Boolean false.
pub const FALSE: u8 = 20;

/// Boolean true.
pub const TRUE: u8 = 21;

/// Null.
pub const NULL: u8 = 22;

/// Undefined.
pub const UNDEFINED: u8 = 23;

/// Returns the diagnostic name for an assigned simple code.
pub fn simple_name(code: u8) -> Option<&'static str> {
    match code {
        FALSE => Some("false"),
        TRUE => Some("true"),
        NULL => Some("null"),
        UNDEFINED => Some("undefined"),
        _ => None,
    }
}

/// Returns true if the code is one of the two boolean codes.
pub fn is_bool(code: u8) -> bool {
    code == FALSE || code == TRUE
}
