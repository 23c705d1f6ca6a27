//! Clock port so time-window logic is testable.

use crate::domain::foundation::Timestamp;

/// Current-time indirection.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_object_safe() {
        fn _accepts_dyn(_c: &dyn Clock) {}
    }
}
