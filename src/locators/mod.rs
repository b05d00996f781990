pub mod locator_model;
