//! Yes/No/Unsure questionnaire that reaches an advisory category from
//! self-report alone.
//!
//! A position in the questionnaire is the string of answer letters given so
//! far (`Y`, `N`, `X` for Unsure). The tree is a flat table from path to
//! node, walked by [`SelfAssessmentTree::answer`].

mod nodes;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use mathplan_model::AdvisoryCategory;
use serde::Serialize;

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    Unsure,
}

impl Answer {
    pub const ALL: [Answer; 3] = [Answer::Yes, Answer::No, Answer::Unsure];

    pub fn letter(&self) -> char {
        match self {
            Answer::Yes => 'Y',
            Answer::No => 'N',
            Answer::Unsure => 'X',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'Y' => Some(Answer::Yes),
            'N' => Some(Answer::No),
            'X' => Some(Answer::Unsure),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Answer::Yes => "yes",
            Answer::No => "no",
            Answer::Unsure => "unsure",
        };
        f.write_str(label)
    }
}

impl FromStr for Answer {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "y" | "yes" => Ok(Answer::Yes),
            "n" | "no" => Ok(Answer::No),
            "x" | "unsure" | "?" => Ok(Answer::Unsure),
            _ => Err(EngineError::bad_path(s, "answer must be yes, no or unsure")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Number shown to the student; repeats across branches.
    pub number: u8,
    pub prompt: &'static str,
    pub allows_unsure: bool,
}

impl Question {
    pub fn accepts(&self, answer: Answer) -> bool {
        answer != Answer::Unsure || self.allows_unsure
    }

    pub fn answers(&self) -> impl Iterator<Item = Answer> + '_ {
        Answer::ALL.into_iter().filter(|answer| self.accepts(*answer))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Terminal {
    pub category: AdvisoryCategory,
    pub advice: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Question(Question),
    Terminal(Terminal),
}

impl Node {
    pub fn as_question(&self) -> Option<&Question> {
        match self {
            Node::Question(question) => Some(question),
            Node::Terminal(_) => None,
        }
    }

    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Node::Terminal(terminal) => Some(terminal),
            Node::Question(_) => None,
        }
    }
}

/// A position in the questionnaire and the node found there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step<'t> {
    pub path: String,
    pub node: &'t Node,
}

#[derive(Debug, Clone)]
pub struct SelfAssessmentTree {
    nodes: BTreeMap<String, Node>,
}

impl SelfAssessmentTree {
    /// The built-in questionnaire.
    pub fn builtin() -> Result<Self> {
        Self::from_nodes(
            nodes::NODES
                .iter()
                .map(|(path, node)| ((*path).to_string(), node.clone())),
        )
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = (String, Node)>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for (path, node) in nodes {
            if map.contains_key(&path) {
                return Err(EngineError::InvalidTree {
                    path,
                    message: "defined twice".to_string(),
                });
            }
            map.insert(path, node);
        }
        let tree = Self { nodes: map };
        tree.validate()?;
        Ok(tree)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at `path`; letters are case-insensitive.
    pub fn node(&self, path: &str) -> Result<&Node> {
        let path = normalize_path(path)?;
        self.nodes
            .get(&path)
            .ok_or_else(|| EngineError::bad_path(path, "no node at this path"))
    }

    /// Applies one answer at `path` and returns the next position.
    pub fn answer(&self, path: &str, answer: Answer) -> Result<Step<'_>> {
        let path = normalize_path(path)?;
        let question = self
            .node(&path)?
            .as_question()
            .ok_or_else(|| EngineError::bad_path(&path, "already at a recommendation"))?;
        if !question.accepts(answer) {
            return Err(EngineError::bad_path(
                &path,
                format!("question {} does not accept {answer}", question.number),
            ));
        }
        let next = format!("{path}{}", answer.letter());
        let node = self.node(&next)?;
        Ok(Step { path: next, node })
    }

    /// Replays a full answer string from the first question.
    pub fn walk(&self, answers: &str) -> Result<Step<'_>> {
        let answers = normalize_path(answers)?;
        let mut step = Step {
            path: String::new(),
            node: self.node("")?,
        };
        for letter in answers.chars() {
            let answer = Answer::from_letter(letter)
                .ok_or_else(|| EngineError::bad_path(&answers, "unexpected letter"))?;
            step = self.answer(&step.path, answer)?;
        }
        Ok(step)
    }

    /// Every terminal path, depth first with answers in Yes, No, Unsure order.
    pub fn paths(&self) -> Vec<(String, &Terminal)> {
        let mut out = Vec::new();
        let mut stack = vec![String::new()];
        while let Some(path) = stack.pop() {
            match self.nodes.get(&path) {
                Some(Node::Terminal(terminal)) => out.push((path, terminal)),
                Some(Node::Question(question)) => {
                    let children: Vec<String> = question
                        .answers()
                        .map(|answer| format!("{path}{}", answer.letter()))
                        .collect();
                    stack.extend(children.into_iter().rev());
                }
                None => {}
            }
        }
        out
    }

    fn validate(&self) -> Result<()> {
        if !matches!(self.nodes.get(""), Some(Node::Question(_))) {
            return Err(EngineError::InvalidTree {
                path: String::new(),
                message: "the root must be a question".to_string(),
            });
        }
        for (path, node) in &self.nodes {
            if let Some(last) = path.chars().last() {
                let parent = &path[..path.len() - last.len_utf8()];
                let answer = Answer::from_letter(last).ok_or_else(|| invalid(path, "bad letter"))?;
                match self.nodes.get(parent) {
                    Some(Node::Question(question)) if question.accepts(answer) => {}
                    Some(Node::Question(question)) => {
                        return Err(invalid(
                            path,
                            format!("question {} does not accept {answer}", question.number),
                        ));
                    }
                    _ => return Err(invalid(path, "parent is not a question")),
                }
            }
            if let Node::Question(question) = node {
                for answer in question.answers() {
                    let child = format!("{path}{}", answer.letter());
                    if !self.nodes.contains_key(&child) {
                        return Err(invalid(path, format!("missing child for {answer}")));
                    }
                }
            }
        }
        Ok(())
    }
}

fn invalid(path: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidTree {
        path: path.to_string(),
        message: message.into(),
    }
}

fn normalize_path(path: &str) -> Result<String> {
    let normalized = path.trim().to_ascii_uppercase();
    if let Some(bad) = normalized.chars().find(|c| Answer::from_letter(*c).is_none()) {
        return Err(EngineError::bad_path(
            path,
            format!("unexpected letter {bad:?}"),
        ));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_parse_words_and_letters() {
        assert_eq!("Yes".parse::<Answer>().unwrap(), Answer::Yes);
        assert_eq!("x".parse::<Answer>().unwrap(), Answer::Unsure);
        assert!("maybe".parse::<Answer>().is_err());
        assert_eq!(Answer::from_letter('n'), Some(Answer::No));
    }

    #[test]
    fn rejects_orphan_nodes() {
        let nodes = vec![
            (
                String::new(),
                Node::Question(Question {
                    number: 1,
                    prompt: "?",
                    allows_unsure: false,
                }),
            ),
            (
                "Y".to_string(),
                Node::Terminal(Terminal {
                    category: AdvisoryCategory::NoActionNeeded,
                    advice: "",
                }),
            ),
            (
                "N".to_string(),
                Node::Terminal(Terminal {
                    category: AdvisoryCategory::StudyAndPlace,
                    advice: "",
                }),
            ),
            (
                "X".to_string(),
                Node::Terminal(Terminal {
                    category: AdvisoryCategory::StudyAndPlace,
                    advice: "",
                }),
            ),
        ];
        let err = SelfAssessmentTree::from_nodes(nodes.clone()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTree { ref path, .. } if path == "X"));

        let tree = SelfAssessmentTree::from_nodes(nodes.into_iter().take(3)).unwrap();
        assert_eq!(tree.paths().len(), 2);
    }

    #[test]
    fn rejects_missing_children() {
        let nodes = vec![(
            String::new(),
            Node::Question(Question {
                number: 1,
                prompt: "?",
                allows_unsure: true,
            }),
        )];
        assert!(SelfAssessmentTree::from_nodes(nodes).is_err());
    }
}
