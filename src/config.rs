//! Loader configuration.
//!
//! The config file is a flat list of `key=value` lines:
//!
//! ```text
//! console=true
//! unitylog=true
//! logfile=true
//! ```
//!
//! A value switches its option on only when it is exactly `true`. Unknown keys
//! and lines without `=` are reported but never stop the loader.

use thiserror::Error ;

use crate::PartialSuccess ;



/// Content written when no config file exists.
pub const DEFAULT_CONFIG: &str = "console=true\nunitylog=true\nlogfile=true" ;

/// Source tag used for config diagnostics.
pub const CONFIG_LOG_SOURCE: &str = "Config" ;

/// Options recognised in the config file. Every option defaults to on.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct LoaderConfig {
	/// `console`: mirror diagnostics to the live console stream.
	pub console: bool,
	/// `unitylog`: mirror host log events into diagnostics.
	pub host_log: bool,
	/// `logfile`: append diagnostics to the persistent log file.
	pub log_file: bool,
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self { console: true, host_log: true, log_file: true }
	}
}

/// A config line that was ignored.
#[derive( Debug, Error, PartialEq, Eq )]
pub enum ConfigWarning {
	#[error( "Unknown label: {0}" )] UnknownKey( String ),
	#[error( "Malformed line {line}: {text}" )] MalformedLine { line: usize, text: String },
}

impl LoaderConfig {

	/// Parses config text, starting from the defaults.
	///
	/// # Partial Success
	/// Lines that can't be applied are skipped and returned as warnings.
	pub fn parse( text: &str ) -> PartialSuccess<Self, ConfigWarning> {

		let mut config = Self::default();

		let warnings = text.lines()
			.enumerate()
			.filter(|( _, line )| !line.trim().is_empty() )
			.filter_map(|( index, line )| config.apply( index + 1, line ).err() )
			.collect();

		( config, warnings )

	}

	fn apply( &mut self, line_number: usize, line: &str ) -> Result<(), ConfigWarning> {

		let Some(( key, value )) = line.split_once( '=' ) else {
			return Err( ConfigWarning::MalformedLine { line: line_number, text: line.to_string() });
		};

		let enabled = value.trim() == "true" ;
		match key.trim() {
			"console" => self.console = enabled,
			"unitylog" => self.host_log = enabled,
			"logfile" => self.log_file = enabled,
			unknown => return Err( ConfigWarning::UnknownKey( unknown.to_string() )),
		}
		Ok(())

	}

}
