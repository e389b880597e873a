//! Property-based tests for learn, forget, bind and unbind

use proptest::prelude::*;
use semframe::manager::DEFAULT_NAMESPACE;
use semframe::store::inference::rdfs_closure;
use semframe::vocab::{RDFS_SUBCLASS_OF, RDF_TYPE};
use semframe::{FrameManager, InferencePolicy, Knowledge, MemFrameFactory, Proposition};
use std::sync::Arc;

fn manager() -> FrameManager {
    FrameManager::with_factory(
        DEFAULT_NAMESPACE,
        Arc::new(MemFrameFactory::with_policy(InferencePolicy::None)),
    )
    .unwrap()
}

/// Relations over a small vocabulary, so generated sets overlap often.
fn knowledge_strategy() -> impl Strategy<Value = Knowledge> {
    let resource = prop::sample::select(vec!["urn:a", "urn:b", "urn:c", "urn:d", "urn:e"]);
    let predicate = prop::sample::select(vec!["urn:p", "urn:q", RDF_TYPE, RDFS_SUBCLASS_OF]);
    prop::collection::vec((resource.clone(), predicate, resource), 0..24).prop_map(|triples| {
        triples
            .into_iter()
            .map(|(s, p, o)| Proposition::relation(s, p, o))
            .collect()
    })
}

proptest! {
    #[test]
    fn learn_then_forget_restores_content(base in knowledge_strategy(), extra in knowledge_strategy()) {
        let manager = manager();
        let frame = manager.create_frame(Some(&base)).unwrap();

        let fresh: Knowledge = extra.iter().filter(|p| !base.contains(p)).cloned().collect();
        prop_assert_eq!(frame.learn(&extra).unwrap(), fresh.len());
        prop_assert_eq!(frame.forget(&fresh).unwrap(), fresh.len());
        prop_assert_eq!(frame.knowledge().unwrap(), base);
    }

    #[test]
    fn bind_returns_number_of_new_statements(a in knowledge_strategy(), b in knowledge_strategy()) {
        let manager = manager();
        let fa = manager.create_frame(Some(&a)).unwrap();
        let fb = manager.create_frame(Some(&b)).unwrap();

        let missing = b.iter().filter(|p| !a.contains(p)).count();
        prop_assert_eq!(fa.bind_knowledge(fb.uri()).unwrap(), missing);
        prop_assert_eq!(fa.bind_knowledge(fb.uri()).unwrap(), 0);
        prop_assert_eq!(fa.size().unwrap(), a.len() + missing);
    }

    #[test]
    fn unbind_leaves_no_peer_statement(a in knowledge_strategy(), b in knowledge_strategy()) {
        let manager = manager();
        let fa = manager.create_frame(Some(&a)).unwrap();
        let fb = manager.create_frame(Some(&b)).unwrap();

        fa.bind_knowledge(fb.uri()).unwrap();
        prop_assert_eq!(fa.unbind_knowledge(fb.uri()).unwrap(), b.len());

        let remaining = fa.knowledge().unwrap();
        prop_assert!(b.iter().all(|p| !remaining.contains(p)));
        prop_assert_eq!(fb.knowledge().unwrap(), b);
    }

    #[test]
    fn manager_size_matches_listing(creates in 1usize..12, removals in prop::collection::vec(any::<prop::sample::Index>(), 0..12)) {
        let manager = manager();
        let mut uris: Vec<String> = (0..creates)
            .map(|_| manager.create_frame(None).unwrap().uri().to_string())
            .collect();

        for index in removals {
            if uris.is_empty() {
                break;
            }
            let uri = uris.remove(index.index(uris.len()));
            manager.remove_frame(&uri).unwrap();
            prop_assert_eq!(manager.size(), manager.list_frames().len());
        }
        prop_assert_eq!(manager.size(), uris.len());
    }

    #[test]
    fn rdfs_closure_reaches_fixpoint(base in knowledge_strategy()) {
        let mut closed = base.clone();
        closed.extend_from(&rdfs_closure(&base));
        prop_assert!(rdfs_closure(&closed).is_empty());
    }
}
