//! # Unit Components
//!
//! This module organizes the unit tests by the component they exercise: the
//! processor core, ISA decoding, SoC memory, configuration and statistics.
