//! Questionnaire content, keyed by answer path.

use mathplan_model::AdvisoryCategory;

use super::{Node, Question, Terminal};

use AdvisoryCategory::{
    BringTranscript as Bring, CheckMajorReqs as Check, NoActionNeeded as NoAction,
    StronglyRecommendPlace as Strongly, StudyAndPlace as Study,
};

const COMPLETED: &str = "Have you completed at least one Mathematics or Statistics course at a \
    college in Colorado with a grade of C- or higher?";
const HUNDRED_LEVEL: &str = "Are any of these courses at the 100 level or higher?";
const BEFORE_ORIENTATION: &str =
    "Will you have your score/transcript before your orientation date?";
const IN_RAMWEB: &str =
    "Does your transfer credit appear in RAMweb under Menu > Records > Transfer Credits?";
const SATISFIES: &str = "Does your transfer credit satisfy the math requirement for your major, \
    or the prerequisites needed for your major so you can register for the correct class at \
    Orientation?";
const EXPECT_SATISFIES: &str = "Do you expect your transfer credit to satisfy the math \
    requirement for your major, or the prerequisites needed for your major so you can register \
    for the correct class at Orientation?";
const CRITICAL: &str =
    "Is math critical to progress in your major beginning with your first semester?";
const DEVELOPMENTAL: &str = "Are any of these courses MAT 055, MAT 093, or MAT 099?";
const DEVELOPMENTAL_IN_RAMWEB: &str = "Does your transfer credit appear in RAMweb under Menu > \
    Records > Transfer Credits (it would appear as MATH-002)?";
const CORE_APPROPRIATE: &str = "Is MATH 101, MATH 105, STAT 100, STAT 201, or STAT 204 \
    appropriate for your degree program at CSU?";
const OTHER_CREDIT: &str = "Do you expect to earn any other college credit in Mathematics or \
    Statistics through a college course or an AP/IB (or similar) exam?";
const EXPECT_CREDIT: &str = "Do you expect to earn college credit in Mathematics or Statistics \
    through a college course or an AP/IB (or similar) test?";
const ANY_CORE: &str = "Does your major accept any 3 credits of AUCC Core Mathematics, including \
    MATH 101, MATH 105, STAT 100, STAT 201 and STAT 204?";

const NO_ACTION: &str = "You do not need to complete the Math Placement Tool.";
const CORE_ONLY: &str = "You do not need to complete the Math Placement Tool. You may register \
    for MATH 101, MATH 105, STAT 100, STAT 201, or STAT 204.";
const DEVELOPMENTAL_CLEARED: &str =
    "You may register for MATH 117 or MATH 120 without completing the Math Placement Tool.";
const DEVELOPMENTAL_OVERRIDE: &str = "Bring a copy (unofficial is OK) of your transcript to Ram \
    Orientation so an adviser can grant an override for MATH 117, and ask for an official copy \
    to be sent to CSU.";
const STUDY: &str = "We recommend that you Review and Practice and complete the Math Placement \
    Tool prior to Ram Orientation.";
const BRING: &str = "Bring a copy (unofficial is OK) of your scores/transcript to Ram Orientation \
    and ask for an official copy to be sent to CSU.";
const SEND_LATER: &str = "Please have an official transcript/score report sent to CSU as soon as \
    possible. In your first semester, please talk with your adviser about how to fulfill the CSU \
    requirement for math.";
const STRONGLY: &str = "We strongly recommend that you Review and Practice and complete the Math \
    Placement Tool. The appropriate placement result will allow you to register for necessary \
    classes (chemistry, physics, economics, etc.) at Ram Orientation.";
const CHECK: &str = "Check Math Requirements for Specific Majors (PDF). You may also refer to \
    your department's website and/or the General Catalog.";

const fn ask(number: u8, prompt: &'static str) -> Node {
    Node::Question(Question {
        number,
        prompt,
        allows_unsure: false,
    })
}

/// Question that also accepts Unsure.
const fn ask_x(number: u8, prompt: &'static str) -> Node {
    Node::Question(Question {
        number,
        prompt,
        allows_unsure: true,
    })
}

const fn end(category: AdvisoryCategory, advice: &'static str) -> Node {
    Node::Terminal(Terminal { category, advice })
}

pub(super) const NODES: &[(&str, Node)] = &[
    ("", ask(1, COMPLETED)),
    // College credit at the 100 level.
    ("Y", ask(2, HUNDRED_LEVEL)),
    ("YY", ask(3, BEFORE_ORIENTATION)),
    ("YYY", ask(4, IN_RAMWEB)),
    ("YYYY", ask_x(5, SATISFIES)),
    ("YYYYY", end(NoAction, NO_ACTION)),
    ("YYYYN", end(Study, STUDY)),
    ("YYYYX", end(Check, CHECK)),
    ("YYYN", ask_x(5, EXPECT_SATISFIES)),
    ("YYYNY", end(Bring, BRING)),
    ("YYYNN", end(Study, STUDY)),
    ("YYYNX", end(Check, CHECK)),
    ("YYN", ask_x(4, CRITICAL)),
    ("YYNY", end(Strongly, STRONGLY)),
    ("YYNN", end(Bring, SEND_LATER)),
    ("YYNX", end(Study, STUDY)),
    // Only courses below the 100 level.
    ("YN", ask(3, DEVELOPMENTAL)),
    ("YNY", ask(4, DEVELOPMENTAL_IN_RAMWEB)),
    ("YNYY", end(NoAction, DEVELOPMENTAL_CLEARED)),
    ("YNYN", end(Bring, DEVELOPMENTAL_OVERRIDE)),
    ("YNN", ask(4, CORE_APPROPRIATE)),
    ("YNNY", end(NoAction, CORE_ONLY)),
    ("YNNN", ask_x(5, OTHER_CREDIT)),
    ("YNNNY", ask(6, BEFORE_ORIENTATION)),
    ("YNNNYY", ask(7, IN_RAMWEB)),
    ("YNNNYYY", ask_x(8, SATISFIES)),
    ("YNNNYYYY", end(NoAction, NO_ACTION)),
    ("YNNNYYYN", end(Study, STUDY)),
    ("YNNNYYYX", end(Check, CHECK)),
    ("YNNNYYN", ask_x(8, EXPECT_SATISFIES)),
    ("YNNNYYNY", end(Bring, BRING)),
    ("YNNNYYNN", end(Study, STUDY)),
    ("YNNNYYNX", end(Check, CHECK)),
    ("YNNNYN", ask_x(7, CRITICAL)),
    ("YNNNYNY", end(Strongly, STRONGLY)),
    ("YNNNYNN", end(Bring, SEND_LATER)),
    ("YNNNYNX", end(Study, STUDY)),
    ("YNNNN", end(Strongly, STRONGLY)),
    ("YNNNX", end(Strongly, STRONGLY)),
    // No college credit yet.
    ("N", ask_x(2, EXPECT_CREDIT)),
    ("NY", ask(3, BEFORE_ORIENTATION)),
    ("NYY", ask(4, IN_RAMWEB)),
    ("NYYY", ask_x(5, SATISFIES)),
    ("NYYYY", end(NoAction, NO_ACTION)),
    ("NYYYN", end(Study, STUDY)),
    ("NYYYX", end(Check, CHECK)),
    ("NYYN", ask_x(5, EXPECT_SATISFIES)),
    ("NYYNY", end(Bring, BRING)),
    ("NYYNN", end(Study, STUDY)),
    ("NYYNX", end(Check, CHECK)),
    ("NYN", ask_x(4, CRITICAL)),
    ("NYNY", end(Strongly, STRONGLY)),
    ("NYNN", end(Bring, SEND_LATER)),
    ("NYNX", end(Study, STUDY)),
    ("NN", ask(3, ANY_CORE)),
    ("NNY", end(NoAction, CORE_ONLY)),
    ("NNN", end(Study, STUDY)),
    ("NX", end(Study, STUDY)),
];
