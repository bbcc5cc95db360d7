/// Monotonic ticket counter for "latest response wins" loading.
///
/// Every fetch trigger takes a ticket with [`RequestSequence::issue`]; when the
/// response arrives it is applied only if its ticket is still the latest one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut seq = RequestSequence::default();
        let first = seq.issue();
        let second = seq.issue();

        assert!(second > first);
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
    }

    #[test]
    fn test_nothing_issued() {
        let seq = RequestSequence::default();
        assert!(!seq.is_latest(1));
    }
}
