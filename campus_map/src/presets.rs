// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in building catalogs.

use alloc::vec;
use alloc::vec::Vec;

use campus_scene::BuildingSpec;

/// The Tandem campus drawing: eight buildings in hit-test order.
///
/// The Main Building has a ground and an upper floor; every other building
/// has a single ground floor. Rooms are not catalogued. Pair with
/// [`MapConfig::default`](crate::MapConfig::default), which matches the
/// drawing's `1000 x 700` size.
#[must_use]
pub fn tandem_campus() -> Vec<BuildingSpec> {
    vec![
        BuildingSpec::new("Main", "Main Building").with_floors(2),
        BuildingSpec::new("Community", "Community Hall").with_floors(1),
        BuildingSpec::new("Art", "Arts Annex").with_floors(1),
        BuildingSpec::new("Music", "Music").with_floors(1),
        BuildingSpec::new("Middle", "Middle School").with_floors(1),
        BuildingSpec::new("Math", "Math/Science Building").with_floors(1),
        BuildingSpec::new("Pavilion", "Pavilion").with_floors(1),
        BuildingSpec::new("Gym", "Field House/Gym").with_floors(1),
    ]
}
