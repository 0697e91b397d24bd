//! Nullable code generator — deterministic OTP codes.

use gauth_otp::CodeGenerator;
use std::sync::Mutex;

/// Returns pre-configured codes in order, cycling when exhausted.
pub struct NullCodes {
    codes: Vec<String>,
    index: Mutex<usize>,
}

impl NullCodes {
    /// Create with a sequence of deterministic codes.
    pub fn new(codes: Vec<&str>) -> Self {
        assert!(!codes.is_empty(), "NullCodes needs at least one code");
        Self {
            codes: codes.into_iter().map(String::from).collect(),
            index: Mutex::new(0),
        }
    }

    /// Create with a single code returned for every call.
    pub fn constant(code: &str) -> Self {
        Self::new(vec![code])
    }
}

impl CodeGenerator for NullCodes {
    fn six_digit(&self) -> String {
        let mut idx = self.index.lock().unwrap();
        let current = *idx % self.codes.len();
        *idx += 1;
        self.codes[current].clone()
    }
}
