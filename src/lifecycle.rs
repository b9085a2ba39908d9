//! The lifecycle capability set every activatable unit implements.

use thiserror::Error ;



/// Boxed error returned by unit code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync> ;

/// The hooks the loader drives on an active unit.
///
/// `start` is called exactly once, at activation. The remaining hooks are
/// forwarded by the dispatcher on every host tick until `on_shutdown`.
pub trait Lifecycle {
	/// One-time start hook, called once all dependencies are active.
	fn start( &mut self ) -> Result<(), BoxError> ;
	/// Per-frame update, receives the time elapsed since the previous frame.
	fn update( &mut self, delta_time: f32 ) -> Result<(), BoxError> ;
	/// Fixed-interval update, receives the fixed step size.
	fn fixed_update( &mut self, fixed_delta_time: f32 ) -> Result<(), BoxError> ;
	/// Called once per frame after the updates.
	fn render_overlay( &mut self ) -> Result<(), BoxError> ;
	/// Called once when the host terminates.
	fn on_shutdown( &mut self ) -> Result<(), BoxError> ;
}

/// Constructs a unit's [`Lifecycle`] implementation.
///
/// Discovery only reads metadata; the entry point is held by the pending record
/// and used by the resolver when the unit's dependencies are met.
pub trait EntryPoint {
	/// Constructs a fresh lifecycle instance.
	///
	/// # Errors
	/// [`ActivationError::NotALifecycle`] if the unit's entry does not provide the
	/// lifecycle capability set, [`ActivationError::Construction`] for any other failure.
	fn instantiate( &self ) -> Result<Box<dyn Lifecycle>, ActivationError> ;
}

/// Why a unit could not be activated.
#[derive( Debug, Error )]
pub enum ActivationError {
	/// The unit's entry does not implement the lifecycle interface.
	#[error( "Entry point does not implement the lifecycle interface: {0}" )] NotALifecycle( String ),
	/// The lifecycle could not be constructed.
	#[error( "Failed to construct lifecycle: {0}" )] Construction( BoxError ),
	/// The lifecycle was constructed but its `start` hook failed.
	#[error( "Start hook failed: {0}" )] Start( BoxError ),
}

/// A lifecycle hook, used to tag dispatch failures.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash )]
pub enum Hook {
	Start,
	Update,
	FixedUpdate,
	RenderOverlay,
	Shutdown,
}

impl std::fmt::Display for Hook {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
		f.write_str( match self {
			Self::Start => "start",
			Self::Update => "update",
			Self::FixedUpdate => "fixed-update",
			Self::RenderOverlay => "render-overlay",
			Self::Shutdown => "on-shutdown",
		})
	}
}

/// A hook that failed on one unit during dispatch.
#[derive( Debug, Error )]
#[error( "{hook} failed in {identity}: {error}" )]
pub struct HookFailure {
	pub identity: String,
	pub hook: Hook,
	pub error: BoxError,
}
