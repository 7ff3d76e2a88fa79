//! Static quiz content: the quiz list and the question tables.

use once_cell::sync::Lazy;
use serde::Serialize;

use super::category::{Animal, Category, Major, QuizKind};
use super::question::{Answer, Question, ResponseMode};

/// Catalog entry describing a quiz template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizInfo {
    pub kind: QuizKind,
    /// Key used in history records.
    pub identifier: &'static str,
    pub title: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

const MAJOR_QUIZ: QuizInfo = QuizInfo {
    kind: QuizKind::Major,
    identifier: "major-quiz",
    title: "What Should You Study?",
    emoji: "🎓",
    description: "Discover your ideal college major based on your personality",
};

const ANIMAL_QUIZ: QuizInfo = QuizInfo {
    kind: QuizKind::Animal,
    identifier: "animal-quiz",
    title: "Which Animal Are You?",
    emoji: "🦁",
    description: "Find out which animal best matches your personality",
};

/// All quizzes in display order.
pub static QUIZZES: [QuizInfo; 2] = [MAJOR_QUIZ, ANIMAL_QUIZ];

impl QuizKind {
    pub fn info(self) -> &'static QuizInfo {
        match self {
            QuizKind::Major => &MAJOR_QUIZ,
            QuizKind::Animal => &ANIMAL_QUIZ,
        }
    }

    pub fn identifier(self) -> &'static str {
        self.info().identifier
    }

    /// Resolve a history identifier back to its quiz kind.
    pub fn from_identifier(identifier: &str) -> Option<QuizKind> {
        QUIZZES
            .iter()
            .find(|info| info.identifier == identifier)
            .map(|info| info.kind)
    }

    /// The fixed question table for this quiz, in authoring order.
    pub fn questions(self) -> &'static [Question] {
        match self {
            QuizKind::Major => MAJOR_QUESTIONS.as_slice(),
            QuizKind::Animal => ANIMAL_QUESTIONS.as_slice(),
        }
    }
}

fn question(text: &str, mode: ResponseMode, answers: [(&str, Category); 4]) -> Question {
    Question::new(
        text,
        mode,
        answers
            .into_iter()
            .map(|(text, category)| Answer::new(text, category))
            .collect(),
    )
}

static MAJOR_QUESTIONS: Lazy<Vec<Question>> = Lazy::new(|| {
    use Category::Major as M;
    use Major::*;
    use ResponseMode::*;

    vec![
        question(
            "How do you prefer to spend your free time? 🎯",
            Single,
            [
                ("💼 Networking events or leadership activities", M(Business)),
                ("⚙️ Building or fixing things", M(Engineering)),
                ("🎨 Creating art or writing", M(Arts)),
                ("🔬 Reading about discoveries or experimenting", M(Science)),
            ],
        ),
        question(
            "Which activities sound most appealing to you? 😊",
            Multiple,
            [
                ("📊 Analyzing data and trends", M(Business)),
                ("🛠️ Designing and prototyping", M(Engineering)),
                ("🎭 Performing or presenting creative work", M(Arts)),
                ("🧪 Conducting experiments", M(Science)),
            ],
        ),
        question(
            "How do you approach problem-solving? 🤔",
            Ranged,
            [
                ("Focus on people and collaboration", M(Business)),
                ("Use logical systems and processes", M(Engineering)),
                ("Think creatively and unconventionally", M(Arts)),
                ("Research and test hypotheses", M(Science)),
            ],
        ),
        question(
            "What's your ideal work environment? 🌟",
            Single,
            [
                ("🏢 Corporate office or startup", M(Business)),
                ("🏭 Lab or workshop with tools", M(Engineering)),
                ("🎨 Creative studio or flexible space", M(Arts)),
                ("🔬 Research facility or university", M(Science)),
            ],
        ),
        question(
            "What motivates you most? 💫",
            Multiple,
            [
                ("💰 Financial success and influence", M(Business)),
                ("🚀 Innovation and efficiency", M(Engineering)),
                ("✨ Self-expression and impact", M(Arts)),
                ("🌍 Discovery and understanding", M(Science)),
            ],
        ),
        question(
            "How structured do you like your day to be? 📅",
            Ranged,
            [
                ("Very structured with clear goals", M(Business)),
                ("Structured but with room for problem-solving", M(Engineering)),
                ("Flexible and spontaneous", M(Arts)),
                ("Organized around research objectives", M(Science)),
            ],
        ),
        question(
            "Which class sounds most interesting? 📚",
            Single,
            [
                ("📈 Economics or Marketing", M(Business)),
                ("💻 Computer Science or Physics", M(Engineering)),
                ("🎬 Film Studies or Literature", M(Arts)),
                ("🧬 Biology or Chemistry", M(Science)),
            ],
        ),
        question(
            "What are your strongest skills? 💪",
            Multiple,
            [
                ("👥 Leadership and communication", M(Business)),
                ("🔧 Technical and analytical thinking", M(Engineering)),
                ("🎨 Creativity and imagination", M(Arts)),
                ("📊 Research and critical thinking", M(Science)),
            ],
        ),
    ]
});

static ANIMAL_QUESTIONS: Lazy<Vec<Question>> = Lazy::new(|| {
    use Animal::*;
    use Category::Animal as A;
    use ResponseMode::*;

    vec![
        question(
            "Which food do you like the most? 🍽️",
            Single,
            [
                ("🥩 Steak", A(Lion)),
                ("🐟 Fish", A(Cat)),
                ("🥕 Carrots", A(Rabbit)),
                ("🌽 Corn", A(Turtle)),
            ],
        ),
        question(
            "Which activities do you enjoy? 😊",
            Multiple,
            [
                ("🏊 Swimming", A(Turtle)),
                ("😴 Sleeping", A(Cat)),
                ("🏃 Running", A(Rabbit)),
                ("🍔 Eating", A(Lion)),
            ],
        ),
        question(
            "How much do you enjoy car rides? 🚗",
            Ranged,
            [
                ("Hate them", A(Cat)),
                ("I get a little nervous", A(Rabbit)),
                ("I barely notice them", A(Turtle)),
                ("Love them", A(Lion)),
            ],
        ),
        question(
            "What's your ideal weekend? 🌟",
            Single,
            [
                ("🎉 Big party with friends", A(Lion)),
                ("📚 Quiet reading at home", A(Cat)),
                ("🌳 Nature walk or picnic", A(Rabbit)),
                ("🧘 Meditation and relaxation", A(Turtle)),
            ],
        ),
        question(
            "What traits describe you best? 💫",
            Multiple,
            [
                ("🎯 Adventurous", A(Lion)),
                ("🎨 Creative", A(Cat)),
                ("❤️ Compassionate", A(Rabbit)),
                ("🧠 Thoughtful", A(Turtle)),
            ],
        ),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_well_formed() {
        for kind in QuizKind::ALL {
            let questions = kind.questions();
            assert!(!questions.is_empty());
            for q in questions {
                q.validate(kind).unwrap();
            }
        }
    }

    #[test]
    fn test_every_mode_is_used() {
        for kind in QuizKind::ALL {
            let modes: Vec<_> = kind.questions().iter().map(|q| q.mode).collect();
            assert!(modes.contains(&ResponseMode::Single));
            assert!(modes.contains(&ResponseMode::Multiple));
            assert!(modes.contains(&ResponseMode::Ranged));
        }
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(QuizKind::Major.identifier(), "major-quiz");
        assert_eq!(QuizKind::from_identifier("animal-quiz"), Some(QuizKind::Animal));
        assert_eq!(QuizKind::from_identifier("unknown"), None);
    }
}
