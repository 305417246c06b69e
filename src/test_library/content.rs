use serde::{Deserialize, Serialize};

use crate::answer_key::{AnswerKey, AnswerValue};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    TrueFalseNotGiven,
    GapFill,
    HeadingMatch,
    MultiSelect,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct QuestionPrompt {
    pub number: u32,
    pub text: String,
}

/// A run of questions sharing instructions and a kind, e.g. "Questions 1-6,
/// True/False/Not Given". `options` carries heading lists or multi-select
/// choices where the kind needs them.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct QuestionGroup {
    pub first_question: u32,
    pub last_question: u32,
    pub kind: QuestionKind,
    pub instructions: String,
    pub options: Vec<String>,
    pub prompts: Vec<QuestionPrompt>,
}

/// One reading passage and its question groups.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TestPart {
    pub number: u32,
    pub title: String,
    pub instructions: String,
    pub passage_title: String,
    pub passage: String,
    pub question_groups: Vec<QuestionGroup>,
}

fn prompts(entries: &[(u32, &str)]) -> Vec<QuestionPrompt> {
    entries
        .iter()
        .map(|(number, text)| QuestionPrompt {
            number: *number,
            text: text.to_string(),
        })
        .collect()
}

const TFNG_INSTRUCTIONS: &str = "Choose TRUE if the statement agrees with the information given in the text, choose FALSE if the statement contradicts the information, or choose NOT GIVEN if there is no information on this.";
const GAP_FILL_INSTRUCTIONS: &str = "Complete the notes. Write ONE WORD ONLY from the text for each answer.";

/// The built-in Academic Reading test shipped with the app.
pub fn builtin_parts() -> Vec<TestPart> {
    vec![
        TestPart {
            number: 1,
            title: "Part 1".to_string(),
            instructions: "Read the text and answer questions 1-13.".to_string(),
            passage_title: "The life and work of Marie Curie".to_string(),
            passage: MARIE_CURIE_PASSAGE.to_string(),
            question_groups: vec![
                QuestionGroup {
                    first_question: 1,
                    last_question: 6,
                    kind: QuestionKind::TrueFalseNotGiven,
                    instructions: TFNG_INSTRUCTIONS.to_string(),
                    options: vec![],
                    prompts: prompts(&[
                        (1, "Marie Curie's husband was a joint winner of both Marie's Nobel Prizes."),
                        (2, "Marie became interested in science when she was a child."),
                        (3, "Marie was able to attend the Sorbonne because of her sister's financial contribution."),
                        (4, "Marie stopped doing research for several years when her children were born."),
                        (5, "Marie took over the teaching position her husband had held."),
                        (6, "Marie's sister Bronia studied the medical uses of radioactivity."),
                    ]),
                },
                QuestionGroup {
                    first_question: 7,
                    last_question: 13,
                    kind: QuestionKind::GapFill,
                    instructions: GAP_FILL_INSTRUCTIONS.to_string(),
                    options: vec![],
                    prompts: prompts(&[
                        (7, "When uranium was discovered to be radioactive, Marie Curie found that the element called ______ had the same property."),
                        (8, "Marie and Pierre Curie's research into the radioactivity of the mineral known as ______ led to the discovery of two new elements."),
                        (9, "In 1911, Marie Curie received recognition for her work on the element ______."),
                        (10, "Marie and Irene Curie developed X-radiography which was used as a medical technique for ______."),
                        (11, "Marie Curie saw the importance of collecting radioactive material both for research and for cases of ______."),
                        (12, "The radioactive material stocked in Paris contributed to the discoveries in the 1930s of the ______ and of what was known as artificial radioactivity."),
                        (13, "During her research, Marie Curie was exposed to radiation and as a result she suffered from ______."),
                    ]),
                },
            ],
        },
        TestPart {
            number: 2,
            title: "Part 2".to_string(),
            instructions: "Read the text and answer questions 14-26.".to_string(),
            passage_title: "The Physics of Traffic Behavior".to_string(),
            passage: TRAFFIC_PASSAGE.to_string(),
            question_groups: vec![
                QuestionGroup {
                    first_question: 14,
                    last_question: 17,
                    kind: QuestionKind::HeadingMatch,
                    instructions: "The text has four sections. Choose the correct heading for each section.".to_string(),
                    options: HEADING_OPTIONS.iter().map(|h| h.to_string()).collect(),
                    prompts: prompts(&[
                        (14, "Section 1"),
                        (15, "Section 2"),
                        (16, "Section 3"),
                        (17, "Section 4"),
                    ]),
                },
                QuestionGroup {
                    first_question: 18,
                    last_question: 23,
                    kind: QuestionKind::MultiSelect,
                    instructions: "Choose TWO correct answers.".to_string(),
                    options: vec![
                        "explaining Helbing and Kerner's attitude to chaos theory".to_string(),
                        "clarifying Helbing and Kerner's conclusions about traffic behaviour".to_string(),
                        "showing how weather and temperature can change traffic flow".to_string(),
                        "drawing parallels between the behaviour of clouds and traffic".to_string(),
                    ],
                    prompts: prompts(&[
                        (18, "Which TWO options describe what the writer is doing in section two?"),
                        (19, "Which TWO factors are mentioned as affecting traffic flow?"),
                        (20, "Which TWO conclusions did the physicists reach?"),
                        (21, "Which TWO applications are mentioned for the research?"),
                        (22, "Which TWO problems are identified with current systems?"),
                        (23, "Which TWO solutions are proposed in the text?"),
                    ]),
                },
            ],
        },
        TestPart {
            number: 3,
            title: "Part 3".to_string(),
            instructions: "Read the text and answer questions 27-40.".to_string(),
            passage_title: "Plain English".to_string(),
            passage: PLAIN_ENGLISH_PASSAGE.to_string(),
            question_groups: vec![
                QuestionGroup {
                    first_question: 27,
                    last_question: 33,
                    kind: QuestionKind::TrueFalseNotGiven,
                    instructions: TFNG_INSTRUCTIONS.to_string(),
                    options: vec![],
                    prompts: prompts(&[
                        (27, "The Plain English campaigns are concerned with the language officials use when communicating with ordinary people."),
                        (28, "Campaigners found it difficult to talk to government officials."),
                        (29, "A change of president in the US meant that the effects of the campaign there were negligible."),
                        (30, "The campaigns have been more successful in Britain than in the USA."),
                        (31, "The number of government forms has been reduced in both countries."),
                        (32, "Language specialists were consulted during the campaigns."),
                        (33, "The campaigns have had a lasting impact on government communication."),
                    ]),
                },
                QuestionGroup {
                    first_question: 34,
                    last_question: 40,
                    kind: QuestionKind::GapFill,
                    instructions: "Complete the summary. Write ONE WORD ONLY from the text for each answer.".to_string(),
                    options: vec![],
                    prompts: prompts(&[
                        (34, "The Plain English movement aims to replace unnecessarily complicated ______ with clearer forms of expression."),
                        (35, "The campaign in Britain began with a symbolic ______ of government forms."),
                        (36, "By 1985, thousands of forms had been ______ or revised."),
                        (37, "President Carter's ______ required regulations to be written in plain English."),
                        (38, "Although this was later ______, it had a lasting impact."),
                        (39, "The movement influenced many ______ to improve their communication."),
                        (40, "There was an increase in plain English usage among ______ and consumers."),
                    ]),
                },
            ],
        },
    ]
}

/// Answer key for the built-in test. Questions 24-26 are deliberately absent,
/// matching the published key this test was taken from.
pub fn default_answer_key() -> AnswerKey {
    let mut key = AnswerKey::new();

    let singles: [(u32, &str); 31] = [
        (1, "FALSE"),
        (2, "NOT GIVEN"),
        (3, "TRUE"),
        (4, "FALSE"),
        (5, "TRUE"),
        (6, "FALSE"),
        (7, "thorium"),
        (8, "pitchblende"),
        (9, "radium"),
        (10, "soldiers"),
        (11, "illness"),
        (12, "neutron"),
        (13, "leukaemia"),
        (14, "B"),
        (15, "F"),
        (16, "A"),
        (17, "G"),
        (27, "TRUE"),
        (28, "NOT GIVEN"),
        (29, "FALSE"),
        (30, "NOT GIVEN"),
        (31, "TRUE"),
        (32, "NOT GIVEN"),
        (33, "NOT GIVEN"),
        (34, "language"),
        (35, "shredding"),
        (36, "disappeared"),
        (37, "Order"),
        (38, "revoked"),
        (39, "organisations"),
        (40, "corporations"),
    ];
    for (number, answer) in singles {
        key.insert(number, AnswerValue::Single(answer.to_string()));
    }

    let multiples: [(u32, [&str; 2]); 6] = [
        (18, ["A", "B"]),
        (19, ["C", "D"]),
        (20, ["A", "C"]),
        (21, ["B", "D"]),
        (22, ["A", "D"]),
        (23, ["B", "C"]),
    ];
    for (number, choices) in multiples {
        key.insert(
            number,
            AnswerValue::Multiple(choices.iter().map(|c| c.to_string()).collect()),
        );
    }

    key
}

const HEADING_OPTIONS: [&str; 7] = [
    "How a maths experiment actually reduced traffic congestion",
    "How a concept from one field of study was applied in another",
    "A lack of investment in driver training",
    "Areas of doubt and disagreement between experts",
    "How different countries have dealt with traffic congestion",
    "The impact of driver behavior on traffic speed",
    "A proposal to take control away from the driver",
];

const MARIE_CURIE_PASSAGE: &str = "Marie Curie is probably the most famous woman scientist who has ever lived. Born Maria Sklodowska in Poland in 1867, she is famous for her work on radioactivity, and was twice a winner of the Nobel Prize. With her husband, Pierre Curie, and Henri Becquerel, she was awarded the 1903 Nobel Prize for Physics, and was then sole winner of the 1911 Nobel Prize for Chemistry. She was the first woman to win a Nobel Prize.

From childhood, Marie was remarkable for her prodigious memory, and at the age of 16 won a gold medal on completion of her secondary education. Because her father lost his savings through bad investment, she then had to take work as a teacher. From her earnings she was able to finance her sister Bronia's medical studies in Paris, on the understanding that Bronia would, in turn, later help her to get an education.

In 1891 this promise was fulfilled and Marie went to Paris and began to study at the Sorbonne (the University of Paris). She often worked far into the night and lived on little more than bread and butter and tea. She came first in the examination in the physical sciences in 1893, and in 1894 was placed second in the examination in mathematical sciences. It was not until the spring of that year that she was introduced to Pierre Curie.

Their marriage in 1895 marked the start of a partnership that was soon to achieve results of world significance. Following Henri Becquerel's discovery in 1896 of a new phenomenon, which Marie later called 'radioactivity', Marie Curie decided to find out if the radioactivity discovered in uranium was to be found in other elements. She discovered that this was true for thorium.

Turning her attention to minerals, she found her interest drawn to pitchblende, a mineral whose radioactivity, superior to that of pure uranium, could be explained only by the presence in the ore of small quantities of an unknown substance of very high activity. Pierre Curie joined her in the work that she had undertaken to resolve this problem, and that led to the discovery of the new elements, polonium and radium. While Pierre Curie devoted himself chiefly to the physical study of the new radiations, Marie Curie struggled to obtain pure radium in the metallic state. This was achieved with the help of the chemist Andre-Louis Debierne, one of Pierre Curie's pupils. Based on the results of this research, Marie Curie received her Doctorate of Science, and in 1903 Marie and Pierre shared with Becquerel the Nobel Prize for Physics for the discovery of radioactivity.

The births of Marie's two daughters, Irene and Eve, in 1897 and 1904 failed to interrupt her scientific work. She was appointed lecturer in physics at the Ecole Normale Superieure for girls in Sevres, France (1900), and introduced a method of teaching based on experimental demonstrations. In December 1904 she was appointed chief assistant in the laboratory directed by Pierre Curie.

The sudden death of her husband in 1906 was a bitter blow to Marie Curie, but was also a turning point in her career: henceforth she was to devote all her energy to completing alone the scientific work that they had undertaken. On May 13, 1906, she was appointed to the professorship that had been left vacant on her husband's death, becoming the first woman to teach at the Sorbonne. In 1911 she was awarded the Nobel Prize for Chemistry for the isolation of a pure form of radium.

During World War I, Marie Curie, with the help of her daughter Irene, devoted herself to the development of the use of X-radiography, including the mobile units which came to be known as 'Little Curies', used for the treatment of wounded soldiers. In 1918 the Radium Institute, whose staff Irene had joined, began to operate in earnest, and became a centre for nuclear physics and chemistry. Marie Curie, now at the highest point of her fame and, from 1922, a member of the Academy of Medicine, researched the chemistry of radioactive substances and their medical applications.

In 1921, accompanied by her two daughters, Marie Curie made a triumphant journey to the United States to raise funds for research on radium. Women there presented her with a gram of radium for her campaign. Marie also gave lectures in Belgium, Brazil, Spain and Czechoslovakia and, in addition, had the satisfaction of seeing the development of the Curie Foundation in Paris, and the inauguration in 1932 in Warsaw of the Radium Institute, where her sister Bronia became director.

One of Marie Curie's outstanding achievements was to have understood the need to accumulate intense radioactive sources, not only to treat illness but also to maintain an abundant supply for research. The existence in Paris at the Radium Institute of a stock of 1.5 grams of radium made a decisive contribution to the success of the experiments undertaken in the years around 1930. This work prepared the way for the discovery of the neutron by Sir James Chadwick and, above all, for the discovery in 1934 by Irene and Frederic Joliot-Curie of artificial radioactivity. A few months after this discovery, Marie Curie died as a result of leukaemia caused by exposure to radiation. She had often carried test tubes containing radioactive isotopes in her pocket, remarking on the pretty blue-green light they gave off.

Her contribution to physics had been immense, not only in her own work, the importance of which had been demonstrated by her two Nobel Prizes, but because of her influence on subsequent generations of nuclear physicists and chemists.";

const TRAFFIC_PASSAGE: &str = "Some years ago, when several theoretical physicists, principally Dirk Helbing and Boris Kerner of Stuttgart, Germany, began publishing papers on traffic flow in publications formally read by traffic engineers, they were clearly working outside their sphere of investigation. They had noticed that if they simulated the movement of vehicles on a highway, using the equations that describe how the molecules of a gas move, some very strange results emerged. Of course, vehicles do not behave exactly like gas molecules: for example, drivers try to avoid collisions by slowing down when they get too near another vehicle, whereas gas molecules have no such concern. However, the physicists modified the equations to take the differences into account and the overall description of traffic as a flowing gas has proved to be a very good one; the moving-gas model of traffic reproduces many phenomena seen in real-world traffic.

The strangest thing that came out of these equations, however, was the implication that congestion can arise completely spontaneously; no external cause is necessary. Vehicles can be flowing freely along, and then suddenly get into a slow-moving ooze. Under the right conditions a brief and local fluctuation in the speed or the distance between vehicles is all that is needed to trigger a system-wide breakdown that persists for hours. In fact, the physicists' analysis suggested such spontaneous breakdowns in traffic flow probably occur quite frequently on highways.";

const PLAIN_ENGLISH_PASSAGE: &str = "There is no theoretical limit to the number of special purposes to which language can be put. As society develops new fields, language is devised to express them. However, the result is often that language becomes very specialised and complex, and complications arise as ordinary people struggle to make sense of it.

Popular anxiety over special uses of language is most markedly seen in the campaigns to promote 'plain' speaking and writing - notably, the Plain English movements of Britain and the USA. The main aim of these campaigns is to attack the use of unnecessarily complicated language ('gobbledegook') by governments, businesses and other authorities whose role puts them in linguistic contact with the general public. The campaigners argue that such language, whether spoken or written, should be replaced by clearer forms of expression.

The movements took shape only in the 1970s, so it is too soon to ascertain their long-term influence on the characteristics of language varieties. But they have certainly played a major part in promoting public awareness of the existence of communication problems, and have influenced many organisations to do something about it. In Britain, the campaign was launched in 1979, by a ritual shredding of government forms in Parliament Square, London. By 1982, the government had published a report telling departments to improve the design of forms, and to abolish those that were no longer needed. By 1985, around 15,700 forms had disappeared and 21,300 had been revised. In the USA, President Carter's Executive Order of March 1978 required regulations to be written in plain English, and although this was revoked by President Reagan in 1981, it promoted a great deal of legislation throughout the country, and an increase in plain English usage amongst corporations and consumers.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parts_cover_forty_questions() {
        let parts = builtin_parts();
        assert_eq!(parts.len(), 3);

        let numbers: Vec<u32> = parts
            .iter()
            .flat_map(|part| part.question_groups.iter())
            .flat_map(|group| group.prompts.iter().map(|p| p.number))
            .collect();
        assert_eq!(numbers.first(), Some(&1));
        assert_eq!(numbers.last(), Some(&40));

        // Prompt numbers stay inside their group's declared range.
        for part in &parts {
            for group in &part.question_groups {
                assert!(group.first_question <= group.last_question);
                for prompt in &group.prompts {
                    assert!(
                        (group.first_question..=group.last_question).contains(&prompt.number),
                        "prompt {} outside group {}-{}",
                        prompt.number,
                        group.first_question,
                        group.last_question
                    );
                }
            }
        }
    }

    #[test]
    fn test_heading_and_multi_select_groups_carry_options() {
        let parts = builtin_parts();
        for part in &parts {
            for group in &part.question_groups {
                match group.kind {
                    QuestionKind::HeadingMatch | QuestionKind::MultiSelect => {
                        assert!(!group.options.is_empty())
                    }
                    _ => assert!(group.options.is_empty()),
                }
            }
        }
    }

    #[test]
    fn test_default_key_matches_builtin_layout() {
        let key = default_answer_key();
        assert_eq!(key.len(), 37);
        // The published key skips questions 24-26.
        for number in 24..=26 {
            assert!(!key.contains_key(&number));
        }
        assert_eq!(
            key.get(&18),
            Some(&AnswerValue::Multiple(vec!["A".to_string(), "B".to_string()]))
        );
        assert_eq!(key.get(&40), Some(&AnswerValue::Single("corporations".to_string())));
    }
}
