use log::info;

/// Component-tagged logging for the scan engine. Every owning component
/// names itself once, so interleaved sweep, loot, and session lines stay
/// attributable.
pub struct LogManager {
    component: &'static str,
}

impl LogManager {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    fn line(&self, message: &str) -> String {
        format!("[{}] {}", self.component, message)
    }

    pub fn record(&self, message: &str) {
        info!("{}", self.line(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_carry_the_component_tag() {
        let logger = LogManager::new("sweep");
        assert_eq!(
            logger.line("retarget 144000000..148000000 Hz"),
            "[sweep] retarget 144000000..148000000 Hz"
        );
    }
}
