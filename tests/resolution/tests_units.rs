use std::sync::Arc;

use delphi::project::Project;
use delphi::syntax::{ExpressionSyntax, NodeIds};

use crate::helpers::assertions::{resolved_declaration, segment_node};
use crate::helpers::factories::WIN32;
use crate::helpers::units::{unit, variable};

#[test]
fn test_last_used_unit_wins() {
    let mut ids = NodeIds::new();
    let numbers = vec![variable(&mut ids, "Shared", "Integer")];
    let numbers = unit(&mut ids, "Numbers", &[], numbers, Vec::new());
    let words = vec![variable(&mut ids, "Shared", "String")];
    let words = unit(&mut ids, "Words", &[], words, Vec::new());

    let plain = ExpressionSyntax::name(&mut ids, "Shared");
    let qualified = ExpressionSyntax::name(&mut ids, "Numbers.Shared");
    let (plain_node, qualified_node) = (segment_node(&plain), segment_node(&qualified));
    let main = unit(&mut ids, "Main", &["Numbers", "Words"], Vec::new(), vec![plain, qualified]);

    let outcomes = Project::with_factory(Arc::clone(&WIN32)).analyze(&[numbers, words, main]);
    assert!(outcomes.iter().all(|outcome| outcome.is_resolved()));
    let main = outcomes[2].resolved().unwrap();

    assert!(main.type_of(plain_node).unwrap().is_string());
    assert!(main.type_of(qualified_node).unwrap().is_integer());
    assert_ne!(
        resolved_declaration(main, plain_node),
        resolved_declaration(main, qualified_node)
    );
}

#[test]
fn test_own_declarations_shadow_used_units() {
    let mut ids = NodeIds::new();
    let library = vec![variable(&mut ids, "Limit", "Integer")];
    let library = unit(&mut ids, "Library", &[], library, Vec::new());
    let own = variable(&mut ids, "Limit", "Double");
    let limit = ExpressionSyntax::name(&mut ids, "Limit");
    let limit_node = segment_node(&limit);
    let main = unit(&mut ids, "Main", &["Library"], vec![own], vec![limit]);

    let outcomes = Project::with_factory(Arc::clone(&WIN32)).analyze(&[main, library]);
    let main = outcomes[0].resolved().unwrap();

    assert!(main.type_of(limit_node).unwrap().is_real());
    let declaration = resolved_declaration(main, limit_node);
    assert_eq!(main.declaration(declaration).scope(), main.scope());
}

#[test]
fn test_unit_missing_from_the_batch_is_tolerated() {
    let mut ids = NodeIds::new();
    let count = vec![variable(&mut ids, "Count", "Integer")];
    let main = unit(&mut ids, "Main", &["Vcl.Forms"], count, Vec::new());

    let outcomes = Project::with_factory(Arc::clone(&WIN32)).analyze(&[main]);

    assert!(outcomes[0].is_resolved());
    assert!(outcomes[0].resolved().unwrap().lookup("Count").is_some());
}
