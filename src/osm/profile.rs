// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Describes how to convert OSM ways into a [Graph](crate::Graph).
///
/// Profiles are plain, immutable values - usually `const`s like [DEFAULT_PROFILE].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile<'a> {
    /// Human readable name of the routing profile.
    /// This value is not used for the interpretation of OSM data.
    pub name: &'a str,

    /// Road classifications which can be used for routing.
    ///
    /// A way is routable if and only if its `highway` tag exactly matches
    /// [RoadClass::highway] of one of the entries. The matching entry also provides
    /// the speed limit used when the way has no explicit speed limit, so every
    /// routable way always has a speed.
    ///
    /// All speeds must be finite and greater than zero.
    pub roads: &'a [RoadClass<'a>],

    /// Tag holding an explicit speed limit in miles per hour, e.g. `maxspeed_mph`.
    pub speed_tag: &'a str,

    /// Tag marking one-way roads, e.g. `oneway`. Only the exact value `yes`
    /// makes a way one-way.
    pub oneway_tag: &'a str,
}

/// A routable `highway` classification together with its default speed limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadClass<'a> {
    /// Value of the `highway` tag, e.g. "motorway" or "residential".
    pub highway: &'a str,

    /// Speed limit in miles per hour, used when a way doesn't have an explicit one.
    pub speed: f64,
}

impl<'a> Profile<'a> {
    /// Finds the [RoadClass] of a way with given tags.
    /// Returns `None` if the way is not routable.
    pub fn road_class(&self, tags: &HashMap<String, String>) -> Option<&RoadClass<'a>> {
        let highway = tags.get("highway")?;
        self.roads.iter().find(|r| r.highway == highway.as_str())
    }

    /// Returns the speed limit (in mph) of a way with given tags, or `None`
    /// if the way is not routable.
    ///
    /// An explicit speed limit takes precedence over the [RoadClass] default,
    /// unless it isn't a finite positive number, in which case it is ignored.
    pub fn way_speed(&self, tags: &HashMap<String, String>) -> Option<f64> {
        let class = self.road_class(tags)?;

        let explicit = match tags.get(self.speed_tag) {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(speed) if speed.is_finite() && speed > 0.0 => Some(speed),
                _ => {
                    log::warn!("ignoring invalid {}={:?}", self.speed_tag, raw);
                    None
                }
            },
            None => None,
        };

        Some(explicit.unwrap_or(class.speed))
    }

    /// Checks if a way with given tags may only be traversed in the order of its nodes.
    pub fn is_oneway(&self, tags: &HashMap<String, String>) -> bool {
        tags.get(self.oneway_tag).map(|v| v.as_str()) == Some("yes")
    }
}

/// Routing [Profile] for cars, with US speed limits in miles per hour.
pub const DEFAULT_PROFILE: Profile = Profile {
    name: "motorcar",
    roads: &[
        RoadClass {
            highway: "motorway",
            speed: 60.0,
        },
        RoadClass {
            highway: "trunk",
            speed: 45.0,
        },
        RoadClass {
            highway: "primary",
            speed: 35.0,
        },
        RoadClass {
            highway: "secondary",
            speed: 30.0,
        },
        RoadClass {
            highway: "residential",
            speed: 25.0,
        },
        RoadClass {
            highway: "tertiary",
            speed: 25.0,
        },
        RoadClass {
            highway: "unclassified",
            speed: 25.0,
        },
        RoadClass {
            highway: "living_street",
            speed: 10.0,
        },
        RoadClass {
            highway: "motorway_link",
            speed: 30.0,
        },
        RoadClass {
            highway: "trunk_link",
            speed: 30.0,
        },
        RoadClass {
            highway: "primary_link",
            speed: 30.0,
        },
        RoadClass {
            highway: "secondary_link",
            speed: 30.0,
        },
        RoadClass {
            highway: "tertiary_link",
            speed: 25.0,
        },
    ],
    speed_tag: "maxspeed_mph",
    oneway_tag: "oneway",
};
