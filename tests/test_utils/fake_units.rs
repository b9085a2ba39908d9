mod fake_units {

	#![allow( dead_code )]

	use std::sync::{ Arc, Mutex };
	use wasm_modloader::{ ActivationError, BoxError, EntryPoint, Hook, Lifecycle, Registry, UnitDescriptor, UnitRecord };

	/// Shared record of every hook call, as `identity:hook`.
	#[derive( Debug, Clone, Default )]
	pub struct CallLog( Arc<Mutex<Vec<String>>> );

	impl CallLog {

		pub fn new() -> Self { Self::default() }

		pub fn calls( &self ) -> Vec<String> { self.0.lock().unwrap().clone() }

		pub fn count( &self, call: &str ) -> usize {
			self.0.lock().unwrap().iter().filter(| recorded | *recorded == call ).count()
		}

		fn record( &self, identity: &str, call: &str ) {
			self.0.lock().unwrap().push( format!( "{}:{}", identity, call ));
		}

	}

	#[derive( Debug, Clone, Copy, PartialEq, Eq )]
	pub enum Behaviour {
		Healthy,
		NotALifecycle,
		FailConstruction,
		FailOn( Hook ),
	}

	struct FakeLifecycle {
		identity: String,
		calls: CallLog,
		fail_on: Option<Hook>,
	}

	impl FakeLifecycle {
		fn hook( &self, hook: Hook ) -> Result<(), BoxError> {
			self.calls.record( &self.identity, &hook.to_string() );
			match self.fail_on == Some( hook ) {
				true => Err( format!( "{} refused {}", self.identity, hook ).into() ),
				false => Ok(()),
			}
		}
	}

	impl Lifecycle for FakeLifecycle {
		fn start( &mut self ) -> Result<(), BoxError> { self.hook( Hook::Start ) }
		fn update( &mut self, _: f32 ) -> Result<(), BoxError> { self.hook( Hook::Update ) }
		fn fixed_update( &mut self, _: f32 ) -> Result<(), BoxError> { self.hook( Hook::FixedUpdate ) }
		fn render_overlay( &mut self ) -> Result<(), BoxError> { self.hook( Hook::RenderOverlay ) }
		fn on_shutdown( &mut self ) -> Result<(), BoxError> { self.hook( Hook::Shutdown ) }
	}

	struct FakeEntry {
		identity: String,
		calls: CallLog,
		behaviour: Behaviour,
	}

	impl EntryPoint for FakeEntry {
		fn instantiate( &self ) -> Result<Box<dyn Lifecycle>, ActivationError> {
			self.calls.record( &self.identity, "instantiate" );
			match self.behaviour {
				Behaviour::NotALifecycle => Err( ActivationError::NotALifecycle( "fake entry".to_string() )),
				Behaviour::FailConstruction => Err( ActivationError::Construction( "fake construction failure".into() )),
				Behaviour::Healthy => Ok( Box::new( FakeLifecycle { identity: self.identity.clone(), calls: self.calls.clone(), fail_on: None })),
				Behaviour::FailOn( hook ) => Ok( Box::new( FakeLifecycle { identity: self.identity.clone(), calls: self.calls.clone(), fail_on: Some( hook ) })),
			}
		}
	}

	/// A unit whose identity is `identity` and whose display name is the same.
	pub fn unit( identity: &str, dependencies: &[&str], calls: &CallLog, behaviour: Behaviour ) -> UnitRecord {
		UnitRecord::new(
			UnitDescriptor::new( identity, "tests", "1.0.0" ).with_dependencies( dependencies.iter().copied() ),
			"",
			format!( "{}.wasm", identity ),
			Box::new( FakeEntry { identity: identity.to_string(), calls: calls.clone(), behaviour }),
		)
	}

	pub fn healthy( identity: &str, dependencies: &[&str], calls: &CallLog ) -> UnitRecord {
		unit( identity, dependencies, calls, Behaviour::Healthy )
	}

	pub fn registry( units: impl IntoIterator<Item = UnitRecord> ) -> Registry {
		let mut registry = Registry::new();
		units.into_iter().for_each(| unit | registry.insert( unit ).unwrap() );
		registry
	}

}
