/// Runs blocking work from a UI event handler inside a named span.
pub fn run_blocking<F, T>(task: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let _span = tracing::debug_span!("blocking", task).entered();
    f()
}
