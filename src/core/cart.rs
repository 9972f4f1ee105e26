//! Cart-drawer opening with an explicit capability chain.
//!
//! The storefront may expose several ways to open the cart (an in-process
//! drawer, a themed cart icon, ...). Each integration implements
//! `CartSurface`; the dispatcher probes them in priority order and falls
//! back to plain navigation to the cart page when none succeeds. Callers
//! cannot assume which path executes, only the reported outcome.

/// A surface that may be able to open the cart.
pub trait CartSurface {
    fn name(&self) -> &str;

    /// Attempt to open the cart. Returns false when this surface is not
    /// currently available, letting the dispatcher try the next one.
    fn try_open(&mut self) -> bool;
}

/// Result of a cart-open request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    /// An adapter handled the request; carries the adapter name.
    Opened(String),
    /// Every adapter declined; navigate to the cart page instead.
    Navigated(String),
}

/// Prioritized list of cart surfaces plus the navigation fallback.
pub struct CartDispatcher {
    surfaces: Vec<Box<dyn CartSurface>>,
    fallback_url: String,
}

impl CartDispatcher {
    pub fn new(fallback_url: impl Into<String>) -> Self {
        Self {
            surfaces: Vec::new(),
            fallback_url: fallback_url.into(),
        }
    }

    /// Register a surface. Earlier registrations are probed first.
    pub fn register(&mut self, surface: Box<dyn CartSurface>) {
        self.surfaces.push(surface);
    }

    pub fn open(&mut self) -> CartOutcome {
        for surface in &mut self.surfaces {
            if surface.try_open() {
                log::debug!("cart opened via '{}'", surface.name());
                return CartOutcome::Opened(surface.name().to_string());
            }
        }
        log::debug!("no cart surface available, navigating to {}", self.fallback_url);
        CartOutcome::Navigated(self.fallback_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSurface {
        name: &'static str,
        available: bool,
        opens: std::rc::Rc<std::cell::RefCell<Vec<&'static str>>>,
    }

    impl CartSurface for FakeSurface {
        fn name(&self) -> &str {
            self.name
        }

        fn try_open(&mut self) -> bool {
            self.opens.borrow_mut().push(self.name);
            self.available
        }
    }

    #[test]
    fn test_first_available_surface_wins() {
        let opens = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut dispatcher = CartDispatcher::new("/cart");
        dispatcher.register(Box::new(FakeSurface {
            name: "drawer",
            available: false,
            opens: opens.clone(),
        }));
        dispatcher.register(Box::new(FakeSurface {
            name: "cart-icon",
            available: true,
            opens: opens.clone(),
        }));
        dispatcher.register(Box::new(FakeSurface {
            name: "legacy-link",
            available: true,
            opens: opens.clone(),
        }));

        assert_eq!(dispatcher.open(), CartOutcome::Opened("cart-icon".to_string()));
        // Probing stopped at the first success.
        assert_eq!(*opens.borrow(), vec!["drawer", "cart-icon"]);
    }

    #[test]
    fn test_all_declining_falls_back_to_navigation() {
        let opens = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut dispatcher = CartDispatcher::new("/cart");
        dispatcher.register(Box::new(FakeSurface {
            name: "drawer",
            available: false,
            opens,
        }));

        assert_eq!(dispatcher.open(), CartOutcome::Navigated("/cart".to_string()));
    }

    #[test]
    fn test_empty_dispatcher_navigates() {
        let mut dispatcher = CartDispatcher::new("/custom-cart");
        assert_eq!(
            dispatcher.open(),
            CartOutcome::Navigated("/custom-cart".to_string())
        );
    }
}
