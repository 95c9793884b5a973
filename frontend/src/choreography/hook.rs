use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use super::engine::{Choreography, Score};
use super::web::WebChoreography;
use super::ChoreographyConfig;

/// Access to the engine a component mounted. Does nothing while the page is
/// static (no window, or between a teardown and the next mount).
#[derive(Clone)]
pub struct ChoreographyHandle {
    engine: Rc<RefCell<Option<Choreography>>>,
}

impl PartialEq for ChoreographyHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.engine, &other.engine)
    }
}

impl ChoreographyHandle {
    fn with(&self, f: impl FnOnce(&Choreography)) {
        let engine = self.engine.borrow().clone();
        if let Some(engine) = engine {
            f(&engine);
        }
    }

    pub fn pause(&self) {
        self.with(Choreography::pause);
    }

    pub fn resume(&self) {
        self.with(Choreography::resume);
    }

    pub fn scroll_to_element(&self, selector: &str) {
        self.with(|engine| engine.scroll_to_element(selector));
    }
}

/// Mounts the choreography built by `build` after the component renders and
/// destroys it on unmount or when `deps` change.
#[hook]
pub fn use_choreography<D, S, F>(deps: D, build: F) -> ChoreographyHandle
where
    D: PartialEq + 'static,
    S: Score + 'static,
    F: FnOnce(&D) -> S + 'static,
{
    let engine = use_mut_ref(|| None::<Choreography>);
    {
        let engine = engine.clone();
        use_effect_with_deps(
            move |deps: &D| {
                let mounted = WebChoreography::mount(ChoreographyConfig::default(), build(deps));
                *engine.borrow_mut() = mounted.as_ref().map(|web| web.engine().clone());
                move || {
                    engine.borrow_mut().take();
                    if let Some(web) = mounted {
                        web.destroy();
                    }
                }
            },
            deps,
        );
    }
    ChoreographyHandle { engine }
}
