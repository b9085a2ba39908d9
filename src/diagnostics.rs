//! The loader's append-only diagnostics log.
//!
//! Every component writes here: discovery, resolution, dispatch and the units
//! themselves through the `modloader:host/log` import. Each entry is rendered as
//! `[source   ] message`, with the source tag padded to 9 columns.
//!
//! Three outputs are fed from one entry:
//! - an in-memory buffer holding the most recent [`RETAINED_LINES`] lines, read by
//! 	the host's overlay through [`Diagnostics::text`]
//! - the live console stream, emitted as `tracing` events with target `modloader`
//! - an append-only log file, once [`Diagnostics::start_log_file`] has been called
//!
//! Entries logged with [`Diagnostics::log_in_game`] only reach the in-memory buffer.

use std::collections::VecDeque ;
use std::fs::{ File, OpenOptions };
use std::io::Write ;
use std::path::{ Path, PathBuf };
use std::sync::{ Arc, Mutex, MutexGuard, PoisonError };



/// Number of newline-delimited lines kept in memory.
pub const RETAINED_LINES: usize = 67 ;

const SOURCE_WIDTH: usize = 9 ;

/// A cloneable handle to the shared diagnostics log.
///
/// Clones write into the same buffer. The handle is `Send + Sync` so it can live
/// inside a wasmtime store and be written from host functions.
#[derive( Debug, Clone, Default )]
pub struct Diagnostics {
	inner: Arc<Mutex<DiagnosticsInner>>,
}

#[derive( Debug )]
struct DiagnosticsInner {
	lines: VecDeque<String>,
	console: bool,
	log_file: Option<PathBuf>,
}

impl Default for DiagnosticsInner {
	fn default() -> Self {
		Self { lines: VecDeque::with_capacity( RETAINED_LINES ), console: true, log_file: None }
	}
}

impl Diagnostics {

	/// Creates an empty log with the console stream enabled and no log file.
	pub fn new() -> Self { Self::default() }

	/// Enables or disables mirroring to the console stream.
	pub fn set_console( &self, enabled: bool ) {
		self.lock().console = enabled ;
	}

	/// Truncates `path` and appends every subsequent entry to it.
	///
	/// # Errors
	/// Returns an error if the file cannot be created. The log keeps working
	/// without a file in that case.
	pub fn start_log_file( &self, path: impl AsRef<Path> ) -> std::io::Result<()> {
		let path = path.as_ref();
		File::create( path )?;
		self.lock().log_file = Some( path.to_path_buf() );
		Ok(())
	}

	/// Stops appending to the log file, if one was started.
	pub fn stop_log_file( &self ) {
		self.lock().log_file = None ;
	}

	/// Appends an entry to every enabled output.
	pub fn log( &self, source: &str, message: impl AsRef<str> ) {
		self.write( source, message.as_ref(), false );
	}

	/// Appends an entry that is only meant for the in-game overlay.
	pub fn log_in_game( &self, source: &str, message: impl AsRef<str> ) {
		self.write( source, message.as_ref(), true );
	}

	/// The retained lines, oldest first.
	pub fn lines( &self ) -> Vec<String> {
		self.lock().lines.iter().cloned().collect()
	}

	/// The retained lines as one newline-terminated block of text.
	pub fn text( &self ) -> String {
		self.lock().lines.iter().fold( String::new(), | mut text, line | {
			text.push_str( line );
			text.push( '\n' );
			text
		})
	}

	/// Number of retained lines. Never exceeds [`RETAINED_LINES`].
	pub fn len( &self ) -> usize { self.lock().lines.len() }

	/// Whether nothing has been logged yet.
	pub fn is_empty( &self ) -> bool { self.lock().lines.is_empty() }

	fn write( &self, source: &str, message: &str, in_game_only: bool ) {

		let entry = format!( "[{:<width$}] {}", source, message, width = SOURCE_WIDTH );
		let mut inner = self.lock();

		entry.split( '\n' ).for_each(| line | inner.lines.push_back( line.to_string() ));
		while inner.lines.len() > RETAINED_LINES { inner.lines.pop_front(); }

		if in_game_only { return }

		if inner.console {
			tracing::info!( target: "modloader", source = source, "{}", message );
		}

		if let Some( path ) = &inner.log_file {
			let appended = OpenOptions::new().append( true ).create( true ).open( path )
				.and_then(| mut file | writeln!( file, "{}", entry ));
			if let Err( err ) = appended {
				tracing::warn!( target: "modloader", path = %path.display(), "failed to append to log file: {}", err );
			}
		}

	}

	fn lock( &self ) -> MutexGuard<'_, DiagnosticsInner> {
		self.inner.lock().unwrap_or_else( PoisonError::into_inner )
	}

}
