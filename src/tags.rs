/// Root element of an LHE document
pub(crate) const LHEF_ROOT: &str = "LesHouchesEvents";
/// Element holding one event table
pub(crate) const EVENT: &str = "event";
/// Marks an optional event information line following the particle table
pub(crate) const INFO_LINE_START: &str = "#";
