/// Identifies one issued request; later requests get larger tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Hands out request tokens and remembers the newest
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Whether no newer request has been issued since `token`
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}
