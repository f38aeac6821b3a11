use std::cell::RefCell;
use std::rc::Rc;

use pitchnet_shared::DependentRegistry;

#[derive(Default)]
struct RegistryCounts {
    restore_calls: u32,
    respawn_calls: u32,
}

/// Dependent-registry stand-in that counts invocations. The session owns
/// the [`CountingRegistry`]; the test keeps the [`RegistryHandle`].
#[derive(Default)]
pub struct CountingRegistry {
    counts: Rc<RefCell<RegistryCounts>>,
}

#[derive(Clone)]
pub struct RegistryHandle {
    counts: Rc<RefCell<RegistryCounts>>,
}

impl CountingRegistry {
    pub fn new() -> (Self, RegistryHandle) {
        let counts = Rc::new(RefCell::new(RegistryCounts::default()));
        (
            Self {
                counts: counts.clone(),
            },
            RegistryHandle { counts },
        )
    }
}

impl RegistryHandle {
    pub fn restore_calls(&self) -> u32 {
        self.counts.borrow().restore_calls
    }

    pub fn respawn_calls(&self) -> u32 {
        self.counts.borrow().respawn_calls
    }
}

impl DependentRegistry for CountingRegistry {
    fn restore_intact(&mut self) {
        self.counts.borrow_mut().restore_calls += 1;
    }

    fn respawn_missing(&mut self) {
        self.counts.borrow_mut().respawn_calls += 1;
    }
}
