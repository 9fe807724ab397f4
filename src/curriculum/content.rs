//! Chapter study content
//!
//! Static material only. The interview-prep text is intentionally terse;
//! the point of each chapter is the worked SQL listing.

use super::ContentBlock;

/// Content blocks for a chapter, empty slice for unknown ids
pub fn body(chapter_id: &str) -> &'static [ContentBlock] {
    match chapter_id {
        "diagnostic" => DIAGNOSTIC,
        "plan" => PLAN,
        "foundations" => FOUNDATIONS,
        "joins" => JOINS,
        "aggregation" => AGGREGATION,
        "subqueries" => SUBQUERIES,
        "window-functions" => WINDOW_FUNCTIONS,
        "ctes" => CTES,
        "null-handling" => NULL_HANDLING,
        "indexing" => INDEXING,
        "mock-test" => MOCK_TEST,
        _ => &[],
    }
}

const DIAGNOSTIC: &[ContentBlock] = &[
    ContentBlock::Text(
        "Seven questions, one pass, no notes. The quiz is not a grade; it exists to \
         find the chapters you should not skip. Wrong answers are collected into a \
         list of study gaps shown with your score.",
    ),
    ContentBlock::Text("Press d from anywhere in the study screen to take the quiz."),
];

const PLAN: &[ContentBlock] = &[
    ContentBlock::Text(
        "Work the chapters in order, but let the diagnostic decide where to slow \
         down. A realistic schedule for a screening interview is one chapter per \
         evening, with the mock exam two days before the interview and again the \
         day before.",
    ),
    ContentBlock::Text(
        "Mark a chapter complete (press c) once you can reproduce its main listing \
         from memory. Completion is tracked across sessions; the percentage in the \
         chapter list is chapters done, nothing fancier.",
    ),
];

const FOUNDATIONS: &[ContentBlock] = &[
    ContentBlock::Text(
        "Interviewers rarely ask about SELECT itself, but sloppy clause order under \
         pressure fails screens. Logical evaluation order is FROM, WHERE, GROUP BY, \
         HAVING, SELECT, ORDER BY, LIMIT - which is why a column alias defined in \
         SELECT cannot be used in WHERE.",
    ),
    ContentBlock::Code {
        language: "sql",
        source: "SELECT o.customer_id,\n       o.total_amount AS amount\nFROM orders AS o\nWHERE o.placed_at >= DATE '2024-01-01'\n  AND o.status <> 'cancelled'\nORDER BY amount DESC\nLIMIT 10;",
    },
    ContentBlock::Text(
        "DISTINCT applies to the whole select list, not a single column. If you \
         reach for DISTINCT to fix duplicate rows, the real bug is usually a join.",
    ),
];

const JOINS: &[ContentBlock] = &[
    ContentBlock::Text(
        "The classic trap: a filter on the right table of a LEFT JOIN placed in \
         WHERE turns it into an INNER JOIN, because unmatched rows carry NULLs and \
         NULL comparisons are never true. Put right-table filters in ON to keep the \
         unmatched rows.",
    ),
    ContentBlock::Code {
        language: "sql",
        source: "-- customers with their 2024 orders, keeping customers without any\nSELECT c.name, o.id AS order_id\nFROM customers c\nLEFT JOIN orders o\n  ON o.customer_id = c.id\n AND o.placed_at >= DATE '2024-01-01'\nORDER BY c.name;",
    },
    ContentBlock::Text(
        "Know the row-count behavior cold: INNER keeps matches only, LEFT keeps all \
         left rows, FULL keeps everything, CROSS is the cartesian product. A join \
         that multiplies rows is almost always a missing key column in ON.",
    ),
];

const AGGREGATION: &[ContentBlock] = &[
    ContentBlock::Text(
        "WHERE filters rows before grouping; HAVING filters groups after. Every \
         non-aggregated column in the select list must appear in GROUP BY.",
    ),
    ContentBlock::Code {
        language: "sql",
        source: "SELECT customer_id,\n       COUNT(*)            AS orders,\n       SUM(total_amount)   AS revenue\nFROM orders\nWHERE status = 'paid'\nGROUP BY customer_id\nHAVING COUNT(*) >= 3\nORDER BY revenue DESC;",
    },
    ContentBlock::Text(
        "COUNT(*) counts rows; COUNT(col) counts non-NULL values of col; \
         COUNT(DISTINCT col) deduplicates first. The difference between the first \
         two is a favorite one-line interview question.",
    ),
];

const SUBQUERIES: &[ContentBlock] = &[
    ContentBlock::Text(
        "A scalar subquery returns one value; a correlated subquery re-evaluates \
         per outer row. EXISTS stops at the first matching row, which both reads \
         better and usually plans better than IN against a large list.",
    ),
    ContentBlock::Code {
        language: "sql",
        source: "SELECT c.name\nFROM customers c\nWHERE EXISTS (\n    SELECT 1\n    FROM orders o\n    WHERE o.customer_id = c.id\n      AND o.total_amount > 500\n);",
    },
    ContentBlock::Text(
        "Beware NOT IN with a subquery that can yield NULL: one NULL makes the \
         whole predicate unknown and the query returns nothing. NOT EXISTS does \
         not have this trap.",
    ),
];

const WINDOW_FUNCTIONS: &[ContentBlock] = &[
    ContentBlock::Text(
        "Window functions compute over a frame of rows without collapsing them. \
         The top-n-per-group pattern below is the single most common hard question \
         in SQL screens; learn the ROW_NUMBER/RANK/DENSE_RANK tie behavior with it.",
    ),
    ContentBlock::Code {
        language: "sql",
        source: "WITH ranked AS (\n    SELECT o.*,\n           ROW_NUMBER() OVER (\n               PARTITION BY o.customer_id\n               ORDER BY o.total_amount DESC\n           ) AS rn\n    FROM orders o\n)\nSELECT *\nFROM ranked\nWHERE rn <= 3;",
    },
    ContentBlock::Text(
        "RANK leaves gaps after ties, DENSE_RANK does not, ROW_NUMBER breaks ties \
         arbitrarily. Aggregates also work as windows: SUM(x) OVER (ORDER BY d) is \
         a running total.",
    ),
];

const CTES: &[ContentBlock] = &[
    ContentBlock::Text(
        "A CTE names a subquery for reuse and readability; a recursive CTE walks \
         hierarchies. The anchor runs once, the recursive member runs until it \
         produces no rows - always make sure it converges.",
    ),
    ContentBlock::Code {
        language: "sql",
        source: "WITH RECURSIVE chain AS (\n    SELECT id, manager_id, name, 1 AS depth\n    FROM employees\n    WHERE manager_id IS NULL\n  UNION ALL\n    SELECT e.id, e.manager_id, e.name, chain.depth + 1\n    FROM employees e\n    JOIN chain ON e.manager_id = chain.id\n)\nSELECT * FROM chain ORDER BY depth, name;",
    },
];

const NULL_HANDLING: &[ContentBlock] = &[
    ContentBlock::Text(
        "NULL is not a value, it is the absence of one. Any comparison with NULL \
         yields unknown, so x = NULL never matches; use IS NULL / IS DISTINCT \
         FROM. Aggregates skip NULLs, which makes AVG over a sparse column \
         subtly wrong if you meant to count absences as zero.",
    ),
    ContentBlock::Code {
        language: "sql",
        source: "SELECT id,\n       COALESCE(discount, 0)        AS discount,\n       NULLIF(quantity, 0)          AS quantity_or_null\nFROM order_lines\nWHERE shipped_at IS NULL;",
    },
];

const INDEXING: &[ContentBlock] = &[
    ContentBlock::Text(
        "A B-tree index serves equality and leftmost-prefix range predicates. A \
         composite index on (a, b) serves WHERE a = ? and WHERE a = ? AND b > ?, \
         but not WHERE b = ? alone. Wrapping an indexed column in a function \
         defeats the index unless there is an expression index to match.",
    ),
    ContentBlock::Code {
        language: "sql",
        source: "CREATE INDEX idx_orders_customer_placed\n    ON orders (customer_id, placed_at);\n\nEXPLAIN\nSELECT *\nFROM orders\nWHERE customer_id = 42\n  AND placed_at >= DATE '2024-06-01';",
    },
    ContentBlock::Text(
        "When asked to speed a query up, narrate the plan: what is scanned, what \
         is filtered, what the index could skip. Interviewers grade the reasoning, \
         not the syntax.",
    ),
];

const MOCK_TEST: &[ContentBlock] = &[
    ContentBlock::Text(
        "Seven problems, sixty minutes, answers autosaved as you type - a restart \
         keeps your drafts but restarts the clock. The timer stopping does not \
         lock your answers; finish your thought, then compare against the \
         solutions (press v).",
    ),
    ContentBlock::Text(
        "Reset (press r) clears every saved answer and returns the timer to the \
         start, after a confirmation. There is no partial reset.",
    ),
];
