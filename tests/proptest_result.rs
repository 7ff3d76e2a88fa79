//! Property-based tests for result aggregation and quiz sessions.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use persona_quiz::prelude::*;

fn kind_strategy() -> impl Strategy<Value = QuizKind> {
    prop_oneof![Just(QuizKind::Major), Just(QuizKind::Animal)]
}

/// A quiz kind with a non-empty list of votes drawn from its own family.
fn votes_strategy() -> impl Strategy<Value = (QuizKind, Vec<Category>)> {
    kind_strategy().prop_flat_map(|kind| {
        let categories = kind.categories().to_vec();
        (Just(kind), prop::collection::vec(prop::sample::select(categories), 1..40))
    })
}

fn as_answers(votes: &[Category]) -> Vec<Answer> {
    votes.iter().map(|c| Answer::new(c.name(), *c)).collect()
}

fn count(votes: &[Category], category: Category) -> usize {
    votes.iter().filter(|c| **c == category).count()
}

proptest! {
    #[test]
    fn winner_has_maximal_count((kind, votes) in votes_strategy()) {
        let winner = compute_result(&as_answers(&votes), kind).unwrap();
        let top = kind.categories().iter().map(|c| count(&votes, *c)).max().unwrap();

        prop_assert!(winner.belongs_to(kind));
        prop_assert_eq!(count(&votes, winner), top);
    }

    #[test]
    fn ties_go_to_first_voted((kind, votes) in votes_strategy()) {
        let winner = compute_result(&as_answers(&votes), kind).unwrap();
        let top = count(&votes, winner);
        let first_top = votes.iter().find(|c| count(&votes, **c) == top).copied().unwrap();

        prop_assert_eq!(winner, first_top);
    }

    #[test]
    fn result_ignores_foreign_votes((kind, votes) in votes_strategy(), noise in 0usize..10) {
        let other = match kind {
            QuizKind::Major => QuizKind::Animal,
            QuizKind::Animal => QuizKind::Major,
        };
        let mut noisy = as_answers(&votes);
        for i in 0..noise {
            let foreign = other.categories()[i % 4];
            noisy.insert(0, Answer::new("stray", foreign));
        }

        prop_assert_eq!(
            compute_result(&noisy, kind).unwrap(),
            compute_result(&as_answers(&votes), kind).unwrap()
        );
    }

    #[test]
    fn single_vote_wins(kind in kind_strategy(), pick in 0usize..4) {
        let category = kind.categories()[pick];
        prop_assert_eq!(compute_result(&as_answers(&[category]), kind).unwrap(), category);
    }

    #[test]
    fn timed_out_session_always_finishes(kind in kind_strategy(), seed in any::<u64>()) {
        let mut session = QuizSession::new(kind, StdRng::seed_from_u64(seed));
        while !session.is_finished() {
            session.time_out().unwrap();
        }
        let (_, total) = session.position();
        prop_assert_eq!(session.answers().len(), total);

        let done = session.finish(chrono::Utc::now()).unwrap();
        prop_assert!(done.outcome.category.belongs_to(kind));
        prop_assert_eq!(done.record.quiz_identifier.as_str(), kind.identifier());
    }

    #[test]
    fn ranged_index_stays_in_bounds(position in any::<f32>()) {
        let question = QuizKind::Animal
            .questions()
            .iter()
            .find(|q| q.mode == ResponseMode::Ranged)
            .unwrap();
        prop_assert!(question.ranged_index(position) < question.answers.len());
    }
}

#[test]
fn empty_votes_have_no_result() {
    for kind in QuizKind::ALL {
        assert!(matches!(
            compute_result(&[], kind),
            Err(QuizError::EmptyResponseSet)
        ));
    }
}
