//! The diagnostic question bank

use super::{QuizOption, QuizQuestion};

/// The fixed diagnostic bank, one question per core topic
pub const QUESTIONS: &[QuizQuestion] = &[
    QuizQuestion {
        id: 1,
        prompt: "A column alias defined in the SELECT list can be referenced in which clause?",
        options: &[
            QuizOption { id: 1, text: "WHERE", correct: false },
            QuizOption { id: 2, text: "GROUP BY", correct: false },
            QuizOption { id: 3, text: "ORDER BY", correct: true },
            QuizOption { id: 4, text: "The join's ON condition", correct: false },
        ],
        explanation: "ORDER BY is evaluated after the SELECT list, so it is the only clause \
                      here that can see the alias. WHERE, GROUP BY and ON all run earlier in \
                      the logical evaluation order.",
        study_topic: "foundations",
    },
    QuizQuestion {
        id: 2,
        prompt: "A LEFT JOIN from customers to orders, with WHERE orders.status = 'paid', \
                 behaves like which join?",
        options: &[
            QuizOption { id: 1, text: "LEFT JOIN, all customers kept", correct: false },
            QuizOption { id: 2, text: "INNER JOIN", correct: true },
            QuizOption { id: 3, text: "FULL OUTER JOIN", correct: false },
            QuizOption { id: 4, text: "CROSS JOIN", correct: false },
        ],
        explanation: "Customers without orders carry NULL in orders.status, the WHERE \
                      predicate is unknown for them, and they are filtered out - exactly an \
                      INNER JOIN. Move the filter into ON to keep unmatched customers.",
        study_topic: "joins",
    },
    QuizQuestion {
        id: 3,
        prompt: "Which clause filters groups rather than rows?",
        options: &[
            QuizOption { id: 1, text: "WHERE total_amount > 100", correct: false },
            QuizOption { id: 2, text: "HAVING COUNT(*) > 100", correct: true },
            QuizOption { id: 3, text: "LIMIT 100", correct: false },
            QuizOption { id: 4, text: "DISTINCT", correct: false },
        ],
        explanation: "WHERE runs before grouping and sees individual rows; HAVING runs after \
                      GROUP BY and can reference aggregates.",
        study_topic: "aggregation",
    },
    QuizQuestion {
        id: 4,
        prompt: "WHERE id NOT IN (SELECT ref_id FROM links) unexpectedly returns zero rows. \
                 The most likely cause?",
        options: &[
            QuizOption { id: 1, text: "The subquery returned duplicate values", correct: false },
            QuizOption { id: 2, text: "The subquery returned at least one NULL", correct: true },
            QuizOption { id: 3, text: "The subquery returned too many rows", correct: false },
            QuizOption { id: 4, text: "id is not indexed", correct: false },
        ],
        explanation: "One NULL in the list makes every NOT IN comparison unknown, so no row \
                      ever qualifies. NOT EXISTS does not have this trap.",
        study_topic: "subqueries",
    },
    QuizQuestion {
        id: 5,
        prompt: "Which window function gives ties the same rank and leaves gaps after them?",
        options: &[
            QuizOption { id: 1, text: "ROW_NUMBER()", correct: false },
            QuizOption { id: 2, text: "RANK()", correct: true },
            QuizOption { id: 3, text: "DENSE_RANK()", correct: false },
            QuizOption { id: 4, text: "NTILE(4)", correct: false },
        ],
        explanation: "RANK repeats a rank for ties and then skips (1, 1, 3); DENSE_RANK does \
                      not skip (1, 1, 2); ROW_NUMBER breaks ties arbitrarily.",
        study_topic: "window-functions",
    },
    QuizQuestion {
        id: 6,
        prompt: "What does WHERE discount = NULL return?",
        options: &[
            QuizOption { id: 1, text: "Rows whose discount is NULL", correct: false },
            QuizOption { id: 2, text: "Rows whose discount is zero", correct: false },
            QuizOption { id: 3, text: "No rows, ever", correct: true },
            QuizOption { id: 4, text: "A syntax error", correct: false },
        ],
        explanation: "Comparing anything to NULL yields unknown, which is never true. Use \
                      discount IS NULL.",
        study_topic: "null-handling",
    },
    QuizQuestion {
        id: 7,
        prompt: "With a B-tree index on (customer_id, placed_at), which predicate can use it?",
        options: &[
            QuizOption { id: 1, text: "WHERE placed_at > DATE '2024-06-01'", correct: false },
            QuizOption {
                id: 2,
                text: "WHERE customer_id = 42 AND placed_at > DATE '2024-06-01'",
                correct: true,
            },
            QuizOption { id: 3, text: "WHERE UPPER(customer_name) = 'ACME'", correct: false },
            QuizOption { id: 4, text: "WHERE placed_at + INTERVAL '1 day' > now()", correct: false },
        ],
        explanation: "A composite index serves leftmost-prefix predicates: equality on \
                      customer_id plus a range on placed_at. A predicate that skips the \
                      leading column, or wraps a column in a function, cannot use it.",
        study_topic: "indexing",
    },
];
