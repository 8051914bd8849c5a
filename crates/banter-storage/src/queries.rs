//! Statement CRUD for the SQLite backend.
//!
//! Statements are stored as one row plus zero or more link rows; hydration
//! stitches them back together. The write path merges rather than
//! overwrites, so concurrent learners only ever add information.

use rusqlite::{params, Connection, OptionalExtension};

use banter_core::conversation::{ResponseLink, Statement};
use banter_core::errors::{BanterError, BanterResult};
use banter_core::traits::FilterSpec;

use crate::to_storage_err;

pub fn count_statements(conn: &Connection) -> BanterResult<usize> {
    conn.query_row("SELECT COUNT(*) FROM statements", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn find_statement(conn: &Connection, text: &str) -> BanterResult<Option<Statement>> {
    let mut stmt = conn
        .prepare("SELECT text, extra_data FROM statements WHERE text = ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let row = stmt
        .query_row(params![text], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match row {
        Some((text, extra_json)) => Ok(Some(hydrate_statement(conn, &text, &extra_json)?)),
        None => Ok(None),
    }
}

pub fn filter_statements(conn: &Connection, spec: &FilterSpec) -> BanterResult<Vec<Statement>> {
    let rows = match spec {
        FilterSpec::All => statement_rows(
            conn,
            "SELECT text, extra_data FROM statements ORDER BY text",
            params![],
        )?,
        FilterSpec::ByText(text) => statement_rows(
            conn,
            "SELECT text, extra_data FROM statements WHERE text = ?1",
            params![text],
        )?,
        FilterSpec::InResponseTo(prompt) => statement_rows(
            conn,
            "SELECT DISTINCT s.text, s.extra_data FROM statements s
             JOIN links l ON l.statement_text = s.text
             WHERE l.prompt_text = ?1
             ORDER BY s.text",
            params![prompt],
        )?,
    };

    rows.into_iter()
        .map(|(text, extra_json)| hydrate_statement(conn, &text, &extra_json))
        .collect()
}

/// Merge-upsert a statement and its links.
/// Wrapped in a transaction: statement row + prompt rows + link rows are
/// all-or-nothing.
pub fn update_statement(conn: &Connection, statement: &Statement) -> BanterResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("update_statement begin: {e}")))?;

    match update_statement_inner(&tx, statement) {
        Ok(()) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("update_statement commit: {e}")))?;
            Ok(())
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

/// Inner update logic, operating on the provided connection (or transaction
/// via Deref).
fn update_statement_inner(conn: &Connection, statement: &Statement) -> BanterResult<()> {
    let extra_json =
        serde_json::to_string(statement.extra_data()).map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute(
        "INSERT INTO statements (text, extra_data) VALUES (?1, ?2)
         ON CONFLICT(text) DO UPDATE SET extra_data = excluded.extra_data",
        params![statement.text(), extra_json],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    for link in statement.in_response_to() {
        // The prompt must exist as a statement row so the graph never
        // dangles, and so the link's foreign key holds.
        conn.execute(
            "INSERT OR IGNORE INTO statements (text) VALUES (?1)",
            params![link.text()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

        // Replace semantics: the caller's occurrence is the final count.
        conn.execute(
            "INSERT INTO links (statement_text, prompt_text, occurrence) VALUES (?1, ?2, ?3)
             ON CONFLICT(statement_text, prompt_text) DO UPDATE SET occurrence = excluded.occurrence",
            params![statement.text(), link.text(), link.occurrence()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    }

    Ok(())
}

pub fn random_statement(conn: &Connection) -> BanterResult<Statement> {
    let mut stmt = conn
        .prepare("SELECT text, extra_data FROM statements ORDER BY RANDOM() LIMIT 1")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let row = stmt
        .query_row([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match row {
        Some((text, extra_json)) => hydrate_statement(conn, &text, &extra_json),
        None => Err(BanterError::EmptyDataset),
    }
}

/// Statements somebody has replied to, i.e. texts that appear on the prompt
/// side of at least one link.
pub fn response_statements(conn: &Connection) -> BanterResult<Vec<Statement>> {
    let rows = statement_rows(
        conn,
        "SELECT text, extra_data FROM statements s
         WHERE EXISTS (SELECT 1 FROM links l WHERE l.prompt_text = s.text)
         ORDER BY text",
        params![],
    )?;

    rows.into_iter()
        .map(|(text, extra_json)| hydrate_statement(conn, &text, &extra_json))
        .collect()
}

/// Delete a statement and every link referencing it from either endpoint.
pub fn remove_statement(conn: &Connection, text: &str) -> BanterResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("remove_statement begin: {e}")))?;

    match remove_statement_inner(&tx, text) {
        Ok(()) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("remove_statement commit: {e}")))?;
            Ok(())
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn remove_statement_inner(conn: &Connection, text: &str) -> BanterResult<()> {
    conn.execute(
        "DELETE FROM links WHERE statement_text = ?1 OR prompt_text = ?1",
        params![text],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute("DELETE FROM statements WHERE text = ?1", params![text])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn drop_all(conn: &Connection) -> BanterResult<()> {
    conn.execute_batch("DELETE FROM links; DELETE FROM statements;")
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Run a query yielding (text, extra_data) pairs.
fn statement_rows(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> BanterResult<Vec<(String, String)>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(out)
}

/// Rebuild a Statement from its row plus its link rows.
fn hydrate_statement(conn: &Connection, text: &str, extra_json: &str) -> BanterResult<Statement> {
    let mut statement = Statement::new(text);

    if !extra_json.is_empty() && extra_json != "{}" {
        let extra: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(extra_json).map_err(|e| to_storage_err(e.to_string()))?;
        for (key, value) in extra {
            statement.set_extra(key, value);
        }
    }

    let mut stmt = conn
        .prepare(
            "SELECT prompt_text, occurrence FROM links
             WHERE statement_text = ?1 ORDER BY rowid",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let links = stmt
        .query_map(params![text], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    for link in links {
        let (prompt_text, occurrence) = link.map_err(|e| to_storage_err(e.to_string()))?;
        statement.upsert_response(ResponseLink::with_occurrence(prompt_text, occurrence));
    }

    Ok(statement)
}
