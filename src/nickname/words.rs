//! Fixed word lists for nickname generation. Not intended to match any
//! other implementation's dictionary; only determinism within this crate
//! is load-bearing (see [`super`]).

pub const ADJECTIVES: &[&str] = &[
    "amber", "brave", "calm", "daring", "eager", "faint", "gentle", "hollow",
    "idle", "jolly", "keen", "lively", "mellow", "noble", "odd", "proud",
    "quiet", "rapid", "sober", "tidy", "urgent", "vivid", "weary", "young",
    "zealous", "ancient", "bold", "crisp", "deft", "elder",
];

pub const NOUNS: &[&str] = &[
    "falcon", "glacier", "harbor", "island", "jasper", "kestrel", "lantern",
    "meadow", "nimbus", "oracle", "prairie", "quarry", "raven", "summit",
    "thicket", "umbra", "valley", "willow", "xylophone", "yonder", "zephyr",
    "anchor", "beacon", "canyon", "delta", "ember", "forge", "grove",
    "horizon", "ivory",
];
