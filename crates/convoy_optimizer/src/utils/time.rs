/// Evaluates `$block` and logs at debug level how long the solver `$phase` took.
#[macro_export]
macro_rules! timed_phase {
    ($phase:literal, $block:expr) => {{
        let started = jiff::Timestamp::now();
        let result = $block;
        tracing::debug!(
            phase = $phase,
            elapsed = ?jiff::Timestamp::now().duration_since(started),
            "Phase finished"
        );

        result
    }};
}
