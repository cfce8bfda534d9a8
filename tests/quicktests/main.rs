//! Property tests that drive the public API only.

mod linked;
