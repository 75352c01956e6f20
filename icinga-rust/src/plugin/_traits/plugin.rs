use crate::plugin::{Family, Status};
use crate::ParsedOptions;

/// Contract every Icinga plugin exposes to its caller.
///
/// Concrete plugins do not implement this directly; they implement their
/// family trait and are adapted by the matching wrapper. The trait is not
/// object safe (`run` returns `&mut Self` for chaining), which is fine
/// because every plugin is a statically known type.
pub trait Plugin {
    /// Which plugin family this instance belongs to.
    fn family(&self) -> Family;

    /// Name the plugin identifies itself as, e.g. in the generated command.
    fn name(&self) -> String;

    /// getopt-style short option characters, unmodified.
    fn short_options(&self) -> &str;

    /// Long option names in declared order, starting with the seeded `help`.
    fn long_options(&self) -> &[String];

    /// Plugin output produced by the last run.
    fn message(&self) -> &str;

    /// Return code produced by the last run.
    fn code(&self) -> Status;

    /// Replaces the parsed options wholesale. No merging, no validation.
    fn set_options(&mut self, options: ParsedOptions) -> &mut Self;

    /// Runs the plugin lifecycle.
    ///
    /// Every failure is captured into the (message, code) pair; this never
    /// panics and nothing propagates to the caller.
    fn run(&mut self) -> &mut Self;
}
