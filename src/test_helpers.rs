//! Shared test helpers for building resolvers over a scripted runner.

use std::collections::HashMap;
use tera::Value;

use crate::platform::FakeRunner;
use crate::resolver::SecretResolver;
use crate::store::Gopass;

pub const EXECUTABLE: &str = "gopass";

/// A resolver over an empty `FakeRunner`.
pub fn fake_resolver() -> SecretResolver<FakeRunner> {
    SecretResolver::new(Gopass::new(EXECUTABLE, FakeRunner::new()))
}

/// A resolver whose runner has been scripted by `script`.
pub fn scripted_resolver(script: impl FnOnce(&FakeRunner)) -> SecretResolver<FakeRunner> {
    let runner = FakeRunner::new();
    script(&runner);
    SecretResolver::new(Gopass::new(EXECUTABLE, runner))
}

/// The runner behind a resolver built by this module.
pub fn runner(resolver: &SecretResolver<FakeRunner>) -> &FakeRunner {
    resolver.store().runner()
}

pub fn terms(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn kwargs(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
