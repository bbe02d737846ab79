//! Options for fhec.
//!
//! ## Contents
//!
//! * A type for fhec options [FhecOpt] containing fields for module options:
//!    * `compile`: [CompileOpt]
//!    * `adjust`: [AdjustOpt]
//!    * `debug`: [DebugOpt]
//!    * `keys`: [KeysOpt]
//!    * all options types implement:
//!       * std's [Default]
//!       * clap's [Args]; all options are settable by
//!          * environmental variable (SHOUTY_SNEK_CASE), e.g., `"MAXIMUM_TABLE_BITS"`
//!          * long option (kebab-case), e.g., `"--maximum-table-bits"`
//!       * these a guaranteed to agree (and we test this)
//!
//! ## Constructing custom options in a compiler driver
//!
//! We recommend that drivers construct custom options using [`clap`][clap].
//! Simply use our (rexported) version of clap in your driver ([crate::clap])
//! and include [FhecOpt] in your [clap::Parser].
//!
//! ```rust
//! use fhec_opt::{FhecOpt, clap::Parser};
//!
//! #[derive(Parser, Debug)]
//! struct BinaryOpt {
//!     #[command(flatten)]
//!     pub fhec: FhecOpt,
//! }
//! ```
//!
//! [clap]: https://crates.io/crates/clap

use clap::{ArgAction, Args, ValueEnum};

use std::default::Default;

/// Re-export our version of clap.
pub use clap;

#[derive(Args, Debug, Clone, Default, PartialEq)]
/// Options that configure fhec
pub struct FhecOpt {
    /// Options for the compilation pipeline
    #[command(flatten)]
    pub compile: CompileOpt,
    /// Options for precision auto-tuning
    #[command(flatten)]
    pub adjust: AdjustOpt,
    /// Options for debug output and artifacts
    #[command(flatten)]
    pub debug: DebugOpt,
    /// Options for key material
    #[command(flatten)]
    pub keys: KeysOpt,
}

/// Options for the compilation pipeline
#[derive(Args, Debug, Clone, PartialEq)]
pub struct CompileOpt {
    /// Accepted probability of error for each table lookup
    #[arg(long = "p-error", env = "P_ERROR", default_value = "0.00001")]
    pub p_error: f64,

    /// How cryptographic parameters are selected
    #[arg(
        long = "parameter-selection-strategy",
        env = "PARAMETER_SELECTION_STRATEGY",
        value_enum,
        default_value = "multi"
    )]
    pub parameter_selection_strategy: ParameterSelectionStrategy,

    /// Compile circuits so they can be chained on encrypted values
    #[arg(long = "composable", env = "COMPOSABLE", action = ArgAction::Set, default_value = "false")]
    pub composable: bool,

    /// Build a simulation runtime (cleartext evaluation, no keys)
    #[arg(long = "fhe-simulation", env = "FHE_SIMULATION", action = ArgAction::Set, default_value = "false")]
    pub fhe_simulation: bool,

    /// Build an execution runtime (client + server)
    #[arg(long = "fhe-execution", env = "FHE_EXECUTION", action = ArgAction::Set, default_value = "true")]
    pub fhe_execution: bool,

    /// Largest allowed lookup-table input width, in bits
    #[arg(
        long = "maximum-table-bits",
        env = "MAXIMUM_TABLE_BITS",
        default_value = "16"
    )]
    pub maximum_table_bits: u32,
}

impl Default for CompileOpt {
    fn default() -> Self {
        Self {
            p_error: 0.00001,
            parameter_selection_strategy: ParameterSelectionStrategy::Multi,
            composable: false,
            fhe_simulation: false,
            fhe_execution: true,
            maximum_table_bits: 16,
        }
    }
}

#[derive(ValueEnum, Debug, PartialEq, Eq, Clone, Copy)]
/// How cryptographic parameters are selected
pub enum ParameterSelectionStrategy {
    /// Legacy single-parameter-set selection
    V0,
    /// One parameter set for the whole program
    Mono,
    /// One parameter set per bit-width partition
    Multi,
}

impl Default for ParameterSelectionStrategy {
    fn default() -> Self {
        ParameterSelectionStrategy::Multi
    }
}

/// Options for precision auto-tuning
#[derive(Args, Debug, Clone, PartialEq)]
pub struct AdjustOpt {
    /// Search for rounding precisions marked "auto"
    #[arg(long = "auto-adjust-rounders", env = "AUTO_ADJUST_ROUNDERS", action = ArgAction::Set, default_value = "false")]
    pub auto_adjust_rounders: bool,

    /// Search for truncation precisions marked "auto"
    #[arg(long = "auto-adjust-truncators", env = "AUTO_ADJUST_TRUNCATORS", action = ArgAction::Set, default_value = "false")]
    pub auto_adjust_truncators: bool,

    /// Largest tolerated deviation from the exact result, per output
    #[arg(
        long = "adjust-tolerance",
        env = "ADJUST_TOLERANCE",
        default_value = "1"
    )]
    pub tolerance: f64,

    /// Fraction of inputset samples that must stay within tolerance
    #[arg(
        long = "adjust-confidence",
        env = "ADJUST_CONFIDENCE",
        default_value = "0.99"
    )]
    pub confidence: f64,

    /// Upper bound on extra precision bits tried by the search
    #[arg(
        long = "adjust-max-extra-bits",
        env = "ADJUST_MAX_EXTRA_BITS",
        default_value = "8"
    )]
    pub max_extra_bits: u32,
}

impl Default for AdjustOpt {
    fn default() -> Self {
        Self {
            auto_adjust_rounders: false,
            auto_adjust_truncators: false,
            tolerance: 1.0,
            confidence: 0.99,
            max_extra_bits: 8,
        }
    }
}

/// Options for debug output and artifacts
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DebugOpt {
    /// Print everything the show flags cover
    #[arg(long = "verbose", env = "VERBOSE", action = ArgAction::Set, default_value = "false")]
    pub verbose: bool,

    /// Print the computation graph after tracing and fusion
    #[arg(long = "show-graph", env = "SHOW_GRAPH", action = ArgAction::Set)]
    pub show_graph: Option<bool>,

    /// Print the bit-width constraints gathered for each circuit
    #[arg(long = "show-bit-width-constraints", env = "SHOW_BIT_WIDTH_CONSTRAINTS", action = ArgAction::Set)]
    pub show_bit_width_constraints: Option<bool>,

    /// Print the bit-width assigned to each node
    #[arg(long = "show-bit-width-assignments", env = "SHOW_BIT_WIDTH_ASSIGNMENTS", action = ArgAction::Set)]
    pub show_bit_width_assignments: Option<bool>,

    /// Print the computation graph with assigned bit-widths
    #[arg(long = "show-assigned-graph", env = "SHOW_ASSIGNED_GRAPH", action = ArgAction::Set)]
    pub show_assigned_graph: Option<bool>,

    /// Print the lowered module
    #[arg(long = "show-module", env = "SHOW_MODULE", action = ArgAction::Set)]
    pub show_module: Option<bool>,

    /// Print program statistics after compilation
    #[arg(long = "show-statistics", env = "SHOW_STATISTICS", action = ArgAction::Set)]
    pub show_statistics: Option<bool>,

    /// Export accumulated debug artifacts if compilation fails unexpectedly
    #[arg(long = "dump-artifacts-on-unexpected-failures", env = "DUMP_ARTIFACTS_ON_UNEXPECTED_FAILURES", action = ArgAction::Set, default_value = "false")]
    pub dump_artifacts_on_unexpected_failures: bool,

    /// Where exported artifacts are written
    #[arg(
        long = "artifacts-output-directory",
        env = "ARTIFACTS_OUTPUT_DIRECTORY",
        default_value = ".fhec-artifacts"
    )]
    pub artifacts_output_directory: String,
}

impl Default for DebugOpt {
    fn default() -> Self {
        Self {
            verbose: false,
            show_graph: None,
            show_bit_width_constraints: None,
            show_bit_width_assignments: None,
            show_assigned_graph: None,
            show_module: None,
            show_statistics: None,
            dump_artifacts_on_unexpected_failures: false,
            artifacts_output_directory: ".fhec-artifacts".into(),
        }
    }
}

/// Options for key material
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct KeysOpt {
    /// Allow options that are unsafe outside of tests and benchmarks
    #[arg(long = "enable-unsafe-features", env = "ENABLE_UNSAFE_FEATURES", action = ArgAction::Set, default_value = "false")]
    pub enable_unsafe_features: bool,

    /// Reuse keys from an on-disk cache (insecure; requires the unsafe gate)
    #[arg(long = "use-insecure-key-cache", env = "USE_INSECURE_KEY_CACHE", action = ArgAction::Set, default_value = "false")]
    pub use_insecure_key_cache: bool,

    /// Directory for the insecure key cache
    #[arg(
        long = "insecure-key-cache-location",
        env = "INSECURE_KEY_CACHE_LOCATION",
        default_value = ""
    )]
    pub insecure_key_cache_location: String,
}

#[cfg(test)]
mod test {

    use super::*;

    use clap::{CommandFactory, Parser};
    use heck::{ToKebabCase, ToShoutySnekCase};

    #[derive(Parser, Debug)]
    struct BinaryOpt {
        #[command(flatten)]
        pub fhec: FhecOpt,
    }

    #[test]
    fn std_and_clap_defaults_agree() {
        let std_default: FhecOpt = Default::default();
        let clap_default: FhecOpt = BinaryOpt::parse_from::<_, &str>(std::iter::empty()).fhec;
        assert_eq!(std_default, clap_default);
    }

    #[test]
    fn long_and_env_names_agree() {
        for arg in BinaryOpt::command().get_arguments() {
            if let Some(long_name) = arg.get_long() {
                if let Some(env_name) = arg.get_env() {
                    let env_name = env_name.to_str().unwrap();
                    assert_eq!(
                        env_name,
                        long_name.TO_SHOUTY_SNEK_CASE(),
                        "The long name\n    '{}'\ndoes not match the envvar name\n    '{}'\n",
                        long_name,
                        env_name,
                    );
                    assert_eq!(
                        env_name,
                        env_name.TO_SHOUTY_SNEK_CASE(),
                        "The envvar name '{}' is not in SHOUTY_SNEK_CASE",
                        env_name,
                    );
                    assert_eq!(
                        long_name,
                        long_name.to_kebab_case(),
                        "The long name '{}' is not in kebab-case",
                        long_name,
                    );
                } else {
                    panic!("Long option '{}' has no envvar", long_name);
                }
            } else if let Some(env_name) = arg.get_env() {
                let env_name = env_name.to_str().unwrap();
                panic!("Envar option '{}' has no long_name", env_name);
            }
        }
    }
}
