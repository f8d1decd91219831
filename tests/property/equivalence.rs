//! Property-based tests for cluster versus long-form resolution

use proptest::prelude::*;
use wsh::builtin::register_builtins;
use wsh::context::{ContextNode, Flag};
use wsh::error::WshError;
use wsh::registry::ContextRegistry;
use wsh::resolve::Resolver;

const SWITCHES: [(char, &str); 6] = [
    ('a', "all"),
    ('b', "brief"),
    ('c', "color"),
    ('d', "dry-run"),
    ('e', "exact"),
    ('g', "global"),
];

const VALUED: [(char, &str); 2] = [('f', "from"), ('s', "since")];

fn registry() -> ContextRegistry {
    let mut node = ContextNode::new('T', "time", "Time tracking").with_script("/plugins/time.sh");
    for (short, long) in SWITCHES {
        node = node.with_flag(Flag::switch(short, long, "switch"));
    }
    for (short, long) in VALUED {
        node = node.with_flag(Flag::with_value(short, long, "value", "valued"));
    }

    let registry = ContextRegistry::new();
    register_builtins(&registry).unwrap();
    registry.register(node).unwrap();
    registry
}

fn long_name(short: char) -> &'static str {
    SWITCHES
        .iter()
        .chain(VALUED.iter())
        .find(|(s, _)| *s == short)
        .map(|(_, long)| *long)
        .unwrap()
}

/// `-Tabf 5 x` and `-T --all --brief --from 5 x` resolve identically
#[test]
fn test_cluster_and_long_forms_resolve_identically() {
    let registry = registry();
    let resolver = Resolver::new(&registry);
    let mut runner = proptest::test_runner::TestRunner::default();

    let strategy = (
        proptest::sample::subsequence(SWITCHES.iter().map(|(s, _)| *s).collect::<Vec<_>>(), 0..=6),
        proptest::option::of((proptest::sample::select(vec!['f', 's']), "[0-9a-z:]{1,5}")),
        proptest::collection::vec("[a-z]{1,6}", 0..3),
    );

    runner
        .run(&strategy, |(switches, valued, positional)| {
            let mut cluster = format!("-T{}", switches.iter().collect::<String>());
            let mut clustered = Vec::new();
            let mut long = vec!["-T".to_string()];
            for short in &switches {
                long.push(format!("--{}", long_name(*short)));
            }
            if let Some((short, value)) = &valued {
                cluster.push(*short);
                long.push(format!("--{}", long_name(*short)));
                long.push(value.clone());
            }
            clustered.push(cluster);
            if let Some((_, value)) = &valued {
                clustered.push(value.clone());
            }
            clustered.extend(positional.iter().cloned());
            long.extend(positional.iter().cloned());

            let a = resolver
                .parse(&clustered[..])
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            let b = resolver
                .parse(&long[..])
                .map_err(|e| TestCaseError::fail(e.to_string()))?;

            prop_assert_eq!(&a.context_path, &vec!['T']);
            prop_assert_eq!(&a.context_path, &b.context_path);
            prop_assert_eq!(&a.flags, &b.flags);
            prop_assert_eq!(&a.args, &positional);
            prop_assert_eq!(&a.args, &b.args);
            prop_assert_eq!(a.flags.len(), switches.len() + usize::from(valued.is_some()));
            Ok(())
        })
        .unwrap();
}

/// A value flag followed by any other character in its cluster always fails
#[test]
fn test_value_flag_must_end_its_cluster() {
    let registry = registry();
    let resolver = Resolver::new(&registry);
    let mut runner = proptest::test_runner::TestRunner::default();

    let strategy = (
        proptest::sample::select(vec!['f', 's']),
        proptest::sample::select(vec!['a', 'b', 'c', 'd', 'e', 'g', 'f', 's']),
        proptest::collection::vec("[a-z0-9]{1,4}", 0..3),
    );

    runner
        .run(&strategy, |(valued, after, rest)| {
            let mut tokens = vec![format!("-T{}{}", valued, after)];
            tokens.extend(rest);
            let result = resolver.parse(&tokens[..]);
            prop_assert!(matches!(result, Err(WshError::MissingFlagArgument(_))));
            Ok(())
        })
        .unwrap();
}
