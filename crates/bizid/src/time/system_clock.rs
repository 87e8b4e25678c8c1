use crate::TimeSource;

/// The system wall clock.
///
/// Performs a time query on every call. Because the wall clock can be
/// stepped backwards (NTP, manual adjustment), this is the source the
/// sequencer's backtrack recovery exists for.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    #[allow(clippy::cast_possible_truncation)]
    fn current_millis(&self) -> u64 {
        #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
        let now = web_time::SystemTime::now().duration_since(web_time::UNIX_EPOCH);
        #[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
        let now = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH);

        // A clock set before 1970 reads as the epoch; the sequencer then
        // treats it as a (large) backtrack.
        now.map_or(0, |d| d.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_current_unix_millis() {
        let before = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let now = SystemClock.current_millis();
        assert!(now >= before);
        // 2020-01-01 as a sanity floor
        assert!(now > 1_577_836_800_000);
    }
}
