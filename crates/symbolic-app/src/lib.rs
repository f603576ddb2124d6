// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod controller;
pub mod geometry;
pub mod ids;
pub mod model;
pub mod registry;
pub mod template;

pub use controller::*;
pub use geometry::*;
pub use ids::*;
pub use model::*;
pub use registry::*;
pub use template::*;
