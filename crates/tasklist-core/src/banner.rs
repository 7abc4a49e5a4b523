use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerMessage {
    pub text: String,
    pub fading: bool,
    ticket: BannerTicket,
}

/// Transient error banner holding one message at a time. A new message
/// replaces the current one; timers scheduled for the old one become no-ops.
#[derive(Debug, Default)]
pub struct ErrorBanner {
    current: Option<BannerMessage>,
    generation: u64,
}

impl ErrorBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&BannerMessage> {
        self.current.as_ref()
    }

    pub fn show(&mut self, text: impl Into<String>) -> BannerTicket {
        self.generation = self.generation.wrapping_add(1);
        let ticket = BannerTicket(self.generation);
        let text = text.into();
        debug!(%text, "showing error banner");
        self.current = Some(BannerMessage {
            text,
            fading: false,
            ticket,
        });
        ticket
    }

    pub fn begin_fade(&mut self, ticket: BannerTicket) -> bool {
        match self.current.as_mut() {
            Some(message) if message.ticket == ticket => {
                message.fading = true;
                true
            }
            _ => false,
        }
    }

    pub fn dismiss(&mut self, ticket: BannerTicket) -> bool {
        if self.current.as_ref().is_some_and(|message| message.ticket == ticket) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
