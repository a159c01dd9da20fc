//! Druckansichten: Zerlegung einer Route in druckbare Kartenausschnitte.

pub mod view;
pub mod views_factory;

pub use view::PrintView;
pub use views_factory::PrintViewsFactory;
