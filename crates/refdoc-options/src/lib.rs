//! Refdoc Options
//!
//! This crate resolves the configuration of a documentation run, including:
//! - The registry of option declarations (name, type, hint, default)
//! - Typed option values and conversion from loosely typed input
//! - Readers for command-line arguments, options files and tsconfig files
//!   (with `extends` chains)
//! - The discovery pipeline that runs readers in priority order and seals the
//!   merged, validated configuration

pub mod config;
pub mod declaration;
pub mod error;
pub mod event;
pub mod jsonc;
pub mod paths;
pub mod pipeline;
pub mod readers;
pub mod registry;
pub mod value;

pub use config::{Configuration, Strictness};
pub use declaration::{OptionDeclaration, ParameterHint, ParameterScope, ParameterType};
pub use error::{ConfigFileError, OptionsError};
pub use event::{DiscoverContext, DiscoverEvent, DiscoverScope};
pub use pipeline::{DiscoveryPipeline, DiscoveryPipelineBuilder, ReaderDescriptor};
pub use readers::{ArgumentsReader, OptionsFileReader, OptionsReader, TsConfigReader};
pub use registry::OptionRegistry;
pub use value::OptionValue;
