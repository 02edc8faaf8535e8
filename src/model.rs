use crate::field::field_or_empty;

// Field capacities in bytes, terminator slot included.
pub const CALL_CAP: usize = 64;
pub const BAND_CAP: usize = 32;
pub const MODE_CAP: usize = 16;
pub const MULT_CAP: usize = 64;
pub const NEWQSO_CAP: usize = 16;
pub const XQSO_CAP: usize = 16;

/// Fields read from one DXLog `<contactinfo>` datagram. Empty means absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub call: String,
    pub band: String,
    pub mode: String,
    pub mult1: String,
    pub mult2: String,
    pub mult3: String,
    pub newqso: String,
    pub xqso: String,
}

impl ContactInfo {
    pub fn from_document(doc: &[u8]) -> Self {
        Self {
            call: field_or_empty(doc, "call", CALL_CAP),
            band: field_or_empty(doc, "band", BAND_CAP),
            mode: field_or_empty(doc, "mode", MODE_CAP),
            mult1: field_or_empty(doc, "mult1", MULT_CAP),
            mult2: field_or_empty(doc, "mult2", MULT_CAP),
            mult3: field_or_empty(doc, "mult3", MULT_CAP),
            newqso: field_or_empty(doc, "newqso", NEWQSO_CAP),
            xqso: field_or_empty(doc, "xqso", XQSO_CAP),
        }
    }

    pub fn has_mult(&self) -> bool {
        !self.mult1.is_empty() || !self.mult2.is_empty() || !self.mult3.is_empty()
    }

    pub fn is_new(&self) -> bool {
        self.newqso.eq_ignore_ascii_case("true")
    }

    /// A new QSO that also carries at least one multiplier.
    pub fn is_trigger(&self) -> bool {
        self.has_mult() && self.is_new()
    }
}
