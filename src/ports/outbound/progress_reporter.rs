/// ProgressReporter port for user-facing progress messages
///
/// Messages go to a side channel (stderr by default) so they never mix
/// with the report written to stdout.
pub trait ProgressReporter {
    /// Reports a step of the analysis
    fn report(&self, message: &str);

    /// Reports progress of a multi-step operation
    ///
    /// # Arguments
    /// * `current` - Steps completed so far
    /// * `total` - Total number of steps
    /// * `message` - Optional label for the step in progress
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a recoverable problem; the operation continues
    fn report_warning(&self, message: &str);

    /// Reports an error; the operation is about to stop
    fn report_error(&self, message: &str);

    /// Reports completion of the whole operation
    fn report_completion(&self, message: &str);
}
