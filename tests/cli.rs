//! End-to-end tests of the `library` binary
//!
//! Every test runs against its own data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn library(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("library").unwrap();
    cmd.env("LIBRARY_CLI_DATA_DIR", dir.path())
        .env_remove("RUST_LOG")
        .env_remove("LIBRARY_CLI_USER")
        .env_remove("LIBRARY_CLI_PASSWORD");
    cmd
}

fn add_dune(dir: &TempDir) {
    library(dir)
        .args(["book", "add", "-t", "Dune", "-a", "Frank Herbert", "-i", "123", "-y", "1965"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added book 1: Dune"));
}

fn add_ann(dir: &TempDir) {
    library(dir)
        .args(["member", "add", "-n", "Ann", "-e", "a@b.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added member 1: Ann"));
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    library(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("borrow"))
        .stdout(predicate::str::contains("shell"));
}

#[test]
fn test_borrow_return_lifecycle() {
    let dir = TempDir::new().unwrap();
    add_dune(&dir);
    add_ann(&dir);

    library(&dir)
        .args(["borrow", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Borrowing 1 opened"));

    library(&dir)
        .args(["book", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status:    borrowed"));

    library(&dir)
        .args(["book", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("open borrowing"));

    library(&dir)
        .args(["borrow", "1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already borrowed"));

    library(&dir)
        .args(["return", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Borrowing 1 closed"));

    library(&dir)
        .args(["return", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already been returned"));

    library(&dir)
        .args(["book", "delete", "1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted book 1: Dune"));

    library(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No borrowings recorded."));
}

#[test]
fn test_delete_asks_for_force() {
    let dir = TempDir::new().unwrap();
    add_dune(&dir);
    add_ann(&dir);

    library(&dir)
        .args(["book", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("This will permanently delete book 1: Dune"))
        .stdout(predicate::str::contains("library book delete 1 --force"));

    library(&dir)
        .args(["member", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("library member delete 1 --force"));

    library(&dir)
        .args(["book", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune"));

    library(&dir)
        .args(["member", "delete", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Member not found: 9"));

    library(&dir)
        .args(["member", "delete", "1", "-f"])
        .assert()
        .success();

    library(&dir)
        .args(["member", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No members found."));
}

#[test]
fn test_tables_written_as_csv() {
    let dir = TempDir::new().unwrap();
    add_dune(&dir);
    add_ann(&dir);
    library(&dir).args(["borrow", "1", "1"]).assert().success();

    let data = dir.path().join("data");
    let books = std::fs::read_to_string(data.join("books.csv")).unwrap();
    assert!(books.starts_with("id,title,author,isbn,published_year,status\n"));
    assert!(books.contains("1,Dune,Frank Herbert,123,1965,borrowed"));

    let members = std::fs::read_to_string(data.join("members.csv")).unwrap();
    assert!(members.contains("1,Ann,a@b.com,"));

    let borrowings = std::fs::read_to_string(data.join("borrowings.csv")).unwrap();
    assert!(borrowings.starts_with("id,book_id,member_id,borrow_date,return_date\n"));
    assert!(borrowings.lines().nth(1).unwrap().ends_with(','));
}

#[test]
fn test_validation_errors_are_reported() {
    let dir = TempDir::new().unwrap();
    add_dune(&dir);

    library(&dir)
        .args(["book", "add", "-t", "Other", "-a", "Someone", "-i", "123", "-y", "2001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ISBN '123' already exists"));

    library(&dir)
        .args(["book", "add", "-t", "Old", "-a", "Someone", "-i", "9", "-y", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Published year must be between 1000"));

    library(&dir)
        .args(["member", "add", "-n", "Ann", "-e", "ann-at-example"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    library(&dir)
        .args(["book", "show", "0"])
        .assert()
        .failure();
}

#[test]
fn test_member_email_unique_ignoring_case() {
    let dir = TempDir::new().unwrap();
    add_ann(&dir);

    library(&dir)
        .args(["member", "add", "-n", "Annie", "-e", "A@B.COM"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    library(&dir)
        .args(["member", "update", "1", "--phone", "555-0100"])
        .assert()
        .success();

    library(&dir)
        .args(["member", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("555-0100"));
}

#[test]
fn test_loans_and_options() {
    let dir = TempDir::new().unwrap();
    add_dune(&dir);
    add_ann(&dir);

    library(&dir)
        .args(["options", "books"])
        .assert()
        .success()
        .stdout("1 - Dune by Frank Herbert (ISBN: 123)\n");

    library(&dir).args(["borrow", "1", "1"]).assert().success();

    library(&dir)
        .arg("loans")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune"))
        .stdout(predicate::str::contains("N/A"));

    library(&dir)
        .args(["options", "loans"])
        .assert()
        .success()
        .stdout("1 - Dune (by Ann)\n");
}

#[test]
fn test_check_and_repair() {
    let dir = TempDir::new().unwrap();
    add_dune(&dir);
    add_ann(&dir);
    std::fs::write(
        dir.path().join("data").join("borrowings.csv"),
        "id,book_id,member_id,borrow_date,return_date\n1,1,1,2024-01-01,\n",
    )
    .unwrap();

    library(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Book 1 is marked available but should be borrowed",
        ));

    library(&dir)
        .args(["check", "--repair"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Repaired 1 book status(es)."));

    library(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No integrity issues found."));
}

#[test]
fn test_corrupt_table_fails_with_line() {
    let dir = TempDir::new().unwrap();
    add_ann(&dir);
    std::fs::write(
        dir.path().join("data").join("books.csv"),
        "id,title,author,isbn,published_year,status\nabc,Dune,Herbert,123,1965,available\n",
    )
    .unwrap();

    library(&dir)
        .args(["book", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_export_json_and_yaml() {
    let dir = TempDir::new().unwrap();
    add_dune(&dir);

    library(&dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"schema_version\": \"1.0.0\""))
        .stdout(predicate::str::contains("\"title\": \"Dune\""));

    let out = dir.path().join("snapshot.yaml");
    library(&dir)
        .args(["export", "--format", "yaml", "--output"])
        .arg(&out)
        .assert()
        .success();
    let yaml = std::fs::read_to_string(&out).unwrap();
    assert!(yaml.contains("title: Dune"));
}

#[test]
fn test_audit_log_records_changes() {
    let dir = TempDir::new().unwrap();
    add_dune(&dir);
    library(&dir)
        .args(["book", "update", "1", "--title", "Dune Messiah"])
        .assert()
        .success();

    library(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Book 1 (Dune)"))
        .stdout(predicate::str::contains("UPDATE Book 1 (Dune Messiah)"));
}

#[test]
fn test_shell_requires_login() {
    let dir = TempDir::new().unwrap();
    library(&dir)
        .arg("shell")
        .env("LIBRARY_CLI_USER", "admin")
        .env("LIBRARY_CLI_PASSWORD", "wrong")
        .write_stdin("book list\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication failed"));
}

#[test]
fn test_shell_session() {
    let dir = TempDir::new().unwrap();
    library(&dir)
        .arg("shell")
        .env("LIBRARY_CLI_USER", "admin")
        .env("LIBRARY_CLI_PASSWORD", "admin123")
        .write_stdin(
            "book add -t 'The Dispossessed' -a 'Ursula K. Le Guin' -i 77 -y 1974\n\
             member add -n Ann -e a@b.com\n\
             borrow 1 1\n\
             borrow 1 1\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, admin"))
        .stdout(predicate::str::contains("Added book 1: The Dispossessed"))
        .stdout(predicate::str::contains("Error: Book 'The Dispossessed' is already borrowed"));

    library(&dir)
        .arg("loans")
        .assert()
        .success()
        .stdout(predicate::str::contains("The Dispossessed"));
}
