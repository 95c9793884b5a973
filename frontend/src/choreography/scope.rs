/// Everything an effect allocated, released in reverse order exactly once.
///
/// Dropping the scope disposes it, so an effect whose setup bails out
/// half-way still releases what it had already acquired.
#[derive(Default)]
pub struct EffectScope {
    disposers: Vec<Box<dyn FnOnce()>>,
}

impl EffectScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defer(&mut self, disposer: impl FnOnce() + 'static) {
        self.disposers.push(Box::new(disposer));
    }

    /// Takes over another scope's disposers; they run before this scope's own.
    pub fn absorb(&mut self, mut other: EffectScope) {
        self.disposers.append(&mut other.disposers);
    }

    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    pub fn dispose(&mut self) {
        while let Some(disposer) = self.disposers.pop() {
            disposer();
        }
    }
}

impl Drop for EffectScope {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn push(log: &Rc<RefCell<Vec<u32>>>, value: u32) -> impl FnOnce() + 'static {
        let log = log.clone();
        move || log.borrow_mut().push(value)
    }

    #[test]
    fn test_disposes_in_reverse_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scope = EffectScope::new();
        scope.defer(push(&log, 1));
        scope.defer(push(&log, 2));
        scope.defer(push(&log, 3));

        scope.dispose();
        scope.dispose();
        assert_eq!(*log.borrow(), vec![3, 2, 1]);
        assert!(scope.is_empty());
    }

    #[test]
    fn test_drop_releases_partial_setup() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let setup = |log: &Rc<RefCell<Vec<u32>>>, hidden: bool| -> Result<EffectScope, &'static str> {
            let mut scope = EffectScope::new();
            scope.defer(push(log, 1));
            scope.defer(push(log, 2));
            if hidden {
                return Err("panel strip hidden");
            }
            Ok(scope)
        };
        assert!(setup(&log, true).is_err());
        assert_eq!(*log.borrow(), vec![2, 1]);
    }

    #[test]
    fn test_absorb() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut outer = EffectScope::new();
        outer.defer(push(&log, 1));
        let mut inner = EffectScope::new();
        inner.defer(push(&log, 2));
        outer.absorb(inner);
        assert_eq!(outer.len(), 2);
        drop(outer);
        assert_eq!(*log.borrow(), vec![2, 1]);
    }
}
