//! Integration tests for gesture resolution.
//!
//! Gestures are built from their wire form, bound against a host snapshot
//! assembled from mock providers, and checked for which scope answered and
//! how many lookups each scope received.

use mockall::mock;
use relay_core::{
    Action, ActionProvider, BoundGesture, DocumentInterceptor, GestureDescriptor, RawGesture,
    ResolvedAction, Scope, ScopeSnapshot, ScopeSource,
};
use serde_json::json;

mock! {
    pub Provider {}
    impl ActionProvider for Provider {
        fn lookup(&self, name: &str) -> Option<Action>;
    }
}

mock! {
    pub Interceptor {}
    impl ActionProvider for Interceptor {
        fn lookup(&self, name: &str) -> Option<Action>;
    }
    impl DocumentInterceptor for Interceptor {
        fn is_ready(&self) -> bool;
    }
}

fn wire_gesture(script_path: serde_json::Value) -> GestureDescriptor {
    let raw: RawGesture = serde_json::from_value(json!({
        "source": "freedomScientific",
        "scriptPath": script_path,
        "id": "br(freedomScientific):topRouting1",
    }))
    .expect("gesture JSON must deserialize");
    GestureDescriptor::from_raw(raw)
}

fn scope_of(bound: &BoundGesture) -> Option<Scope> {
    match bound.resolution() {
        Some(ResolvedAction::Bound { scope, .. }) => Some(*scope),
        _ => None,
    }
}

/// A mock provider that reports a fixed owning module.
struct Owned {
    module: &'static str,
    inner: MockProvider,
}

impl ActionProvider for Owned {
    fn owner_module(&self) -> Option<&str> {
        Some(self.module)
    }

    fn lookup(&self, name: &str) -> Option<Action> {
        self.inner.lookup(name)
    }
}

/// A host with one global extension and a global command table.
struct Host {
    extension: Owned,
    commands: MockProvider,
}

impl ScopeSource for Host {
    fn snapshot(&self) -> ScopeSnapshot<'_> {
        ScopeSnapshot {
            global_extensions: vec![&self.extension],
            global_commands: Some(&self.commands),
            ..Default::default()
        }
    }
}

#[test]
fn test_key_emulation_gesture_never_consults_providers() {
    // Arrange
    let mut commands = MockProvider::new();
    commands.expect_lookup().times(0);
    let snapshot = ScopeSnapshot {
        global_commands: Some(&commands),
        ..Default::default()
    };

    // Act
    let bound = BoundGesture::bind(
        wire_gesture(json!(["globalCommands", "GlobalCommands", "kb:nvda+t"])),
        &snapshot,
    );

    // Assert
    match bound.resolution() {
        Some(ResolvedAction::KeyEmulation(combo)) => assert_eq!(combo.name(), "nvda+t"),
        other => panic!("expected key emulation, got {other:?}"),
    }
}

#[test]
fn test_malformed_script_path_is_unbound_without_lookups() {
    let mut commands = MockProvider::new();
    commands.expect_lookup().times(0);
    let snapshot = ScopeSnapshot {
        global_commands: Some(&commands),
        ..Default::default()
    };

    let bound = BoundGesture::bind(wire_gesture(json!(["globalCommands", "sayAll"])), &snapshot);

    assert!(bound.resolution().is_none());
}

#[test]
fn test_earlier_scope_hit_skips_later_scopes() {
    // Arrange
    let mut extension = MockProvider::new();
    extension
        .expect_lookup()
        .times(1)
        .returning(|name| Some(Action::new(name, |_| Ok(()))));
    let mut commands = MockProvider::new();
    commands.expect_lookup().times(0);
    let host = Host {
        extension: Owned {
            module: "addon.tools",
            inner: extension,
        },
        commands,
    };

    // Act
    let bound = BoundGesture::bind(
        wire_gesture(json!(["addon.tools", "GlobalPlugin", "toolsAction"])),
        &host.snapshot(),
    );

    // Assert
    assert_eq!(scope_of(&bound), Some(Scope::GlobalExtension));
}

#[test]
fn test_foreign_extension_is_filtered_out_before_lookup() {
    // Arrange – the extension belongs to another module, so it must not be asked
    let mut extension = MockProvider::new();
    extension.expect_lookup().times(0);
    let mut commands = MockProvider::new();
    commands
        .expect_lookup()
        .times(1)
        .returning(|name| (name == "toolsAction").then(|| Action::new(name, |_| Ok(()))));
    let host = Host {
        extension: Owned {
            module: "addon.other",
            inner: extension,
        },
        commands,
    };

    // Act
    let bound = BoundGesture::bind(
        wire_gesture(json!(["addon.tools", "GlobalPlugin", "toolsAction"])),
        &host.snapshot(),
    );

    // Assert
    assert_eq!(scope_of(&bound), Some(Scope::GlobalDefault));
}

#[test]
fn test_interceptor_not_ready_is_never_asked() {
    // Arrange
    let mut interceptor = MockInterceptor::new();
    interceptor.expect_is_ready().return_const(false);
    interceptor.expect_lookup().times(0);
    let mut focus = MockProvider::new();
    focus
        .expect_lookup()
        .times(1)
        .returning(|name| Some(Action::new(name, |_| Ok(()))));
    let snapshot = ScopeSnapshot {
        document_interceptor: Some(&interceptor),
        focus: Some(&focus),
        ..Default::default()
    };

    // Act
    let bound = BoundGesture::bind(
        wire_gesture(json!(["browseMode", "BrowseModeTreeInterceptor", "nextHeading"])),
        &snapshot,
    );

    // Assert
    assert_eq!(scope_of(&bound), Some(Scope::FocusedElement));
}

#[test]
fn test_ready_interceptor_wins_over_focused_element() {
    // Arrange
    let mut interceptor = MockInterceptor::new();
    interceptor.expect_is_ready().return_const(true);
    interceptor
        .expect_lookup()
        .times(1)
        .returning(|name| Some(Action::new(name, |_| Ok(()))));
    let mut focus = MockProvider::new();
    focus.expect_lookup().times(0);
    let snapshot = ScopeSnapshot {
        document_interceptor: Some(&interceptor),
        focus: Some(&focus),
        ..Default::default()
    };

    // Act
    let bound = BoundGesture::bind(
        wire_gesture(json!(["browseMode", "BrowseModeTreeInterceptor", "nextHeading"])),
        &snapshot,
    );

    // Assert
    assert_eq!(scope_of(&bound), Some(Scope::DocumentInterceptor));
}

#[test]
fn test_unresolved_gesture_asks_every_applicable_scope_once() {
    // Arrange
    let mut focus = MockProvider::new();
    focus.expect_lookup().times(1).returning(|_| None);
    let mut parent = MockProvider::new();
    parent.expect_lookup().times(1).returning(|_| None);
    let mut grandparent = MockProvider::new();
    grandparent.expect_lookup().times(1).returning(|_| None);
    let mut commands = MockProvider::new();
    commands.expect_lookup().times(1).returning(|_| None);
    let snapshot = ScopeSnapshot {
        focus: Some(&focus),
        focus_ancestors: vec![&parent, &grandparent],
        global_commands: Some(&commands),
        ..Default::default()
    };

    // Act
    let bound = BoundGesture::bind(
        wire_gesture(json!(["globalCommands", "GlobalCommands", "unbound"])),
        &snapshot,
    );

    // Assert
    assert!(bound.resolution().is_none());
}

#[test]
fn test_bound_action_receives_the_remote_gesture() {
    // Arrange
    let mut commands = MockProvider::new();
    commands.expect_lookup().returning(|name| {
        Some(Action::new(name, |gesture| {
            assert_eq!(gesture.source(), "remoteFreedomScientific");
            assert!(gesture.field("id").is_some());
            Ok(())
        }))
    });
    let snapshot = ScopeSnapshot {
        global_commands: Some(&commands),
        ..Default::default()
    };
    let bound = BoundGesture::bind(
        wire_gesture(json!(["globalCommands", "GlobalCommands", "review_top"])),
        &snapshot,
    );

    // Act
    let (gesture, resolution) = bound.into_parts();

    // Assert
    match resolution {
        Some(ResolvedAction::Bound { action, .. }) => action.invoke(&gesture).unwrap(),
        other => panic!("expected bound action, got {other:?}"),
    }
}
