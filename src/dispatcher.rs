//! Forwarding of host ticks to active units.
//!
//! Each tick category is fanned out to every active unit in registry order.
//! Pending units receive nothing. A hook that fails is logged and collected, and
//! dispatch carries on with the next unit.

use crate::{ Diagnostics, Registry };
use crate::lifecycle::{ BoxError, Hook, HookFailure, Lifecycle };



/// Forwards the per-frame update.
pub fn update( registry: &mut Registry, delta_time: f32, diagnostics: &Diagnostics ) -> Vec<HookFailure> {
	dispatch( registry, Hook::Update, diagnostics, | unit | unit.update( delta_time ))
}

/// Forwards the fixed-interval update.
pub fn fixed_update( registry: &mut Registry, fixed_delta_time: f32, diagnostics: &Diagnostics ) -> Vec<HookFailure> {
	dispatch( registry, Hook::FixedUpdate, diagnostics, | unit | unit.fixed_update( fixed_delta_time ))
}

/// Forwards the overlay render callback.
pub fn render_overlay( registry: &mut Registry, diagnostics: &Diagnostics ) -> Vec<HookFailure> {
	dispatch( registry, Hook::RenderOverlay, diagnostics, | unit | unit.render_overlay() )
}

/// Forwards the shutdown notification.
///
/// Calling this more than once is the caller's responsibility; see
/// [`ModLoader::shutdown`]( crate::ModLoader::shutdown ) for the guarded version.
pub fn shutdown( registry: &mut Registry, diagnostics: &Diagnostics ) -> Vec<HookFailure> {
	dispatch( registry, Hook::Shutdown, diagnostics, | unit | unit.on_shutdown() )
}

fn dispatch(
	registry: &mut Registry,
	hook: Hook,
	diagnostics: &Diagnostics,
	mut call: impl FnMut( &mut Box<dyn Lifecycle> ) -> Result<(), BoxError>,
) -> Vec<HookFailure> {
	registry.iter_mut()
		.filter_map(| unit | {
			let identity = unit.identity().to_string();
			unit.lifecycle_mut().map(| lifecycle | ( identity, call( lifecycle )))
		})
		.filter_map(|( identity, result )| result.err().map(| error | HookFailure { identity, hook, error }))
		.inspect(| failure | diagnostics.log( crate::LOG_SOURCE, format!( "Error in {}", failure )))
		.collect()
}
