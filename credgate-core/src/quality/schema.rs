//! Required-column presence check.

use crate::table::Table;

use super::models::{Feed, Finding};

/// Reports each required column of `feed` missing from the header.
///
/// Columns are checked against this file's header only; nothing is carried
/// over from other files.
pub fn check_schema(feed: Feed, table: &Table) -> Vec<Finding> {
    table
        .missing_columns(feed.required_columns())
        .into_iter()
        .map(|column| Finding::MissingColumn {
            feed,
            column: column.to_string(),
            file: table.name().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(content: &str) -> Table {
        Table::from_reader("providers_x.csv", content.as_bytes()).unwrap()
    }

    #[test]
    fn test_complete_header_has_no_findings() {
        let t = table("Status,Specialty,NPI,LastName,FirstName,ProviderID\n");
        assert!(check_schema(Feed::Provider, &t).is_empty());
    }

    #[test]
    fn test_one_finding_per_missing_column() {
        let t = table("ProviderID,FirstName,Status\n1,A,Active\n");
        let lines: Vec<String> = check_schema(Feed::Provider, &t)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            lines,
            vec![
                "Missing required column 'LastName' in provider file: providers_x.csv",
                "Missing required column 'NPI' in provider file: providers_x.csv",
                "Missing required column 'Specialty' in provider file: providers_x.csv",
            ]
        );
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let t = table("providerid,FirstName,LastName,NPI,Specialty,Status\n");
        let findings = check_schema(Feed::Provider, &t);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].to_string().contains("'ProviderID'"));
    }

    #[test]
    fn test_credential_header_against_provider_columns() {
        let t = table(
            "CredentialID,ProviderID,CredentialType,CredentialNumber,IssueDate,ExpiryDate,Status\n",
        );
        assert!(check_schema(Feed::Credential, &t).is_empty());
        // FirstName, LastName, NPI, Specialty
        assert_eq!(check_schema(Feed::Provider, &t).len(), 4);
    }

    #[test]
    fn test_credential_missing_columns_are_labelled() {
        let t = Table::from_reader(
            "credentials_x.csv",
            "CredentialID,ProviderID,CredentialType,CredentialNumber,Status\n".as_bytes(),
        )
        .unwrap();
        let lines: Vec<String> = check_schema(Feed::Credential, &t)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            lines,
            vec![
                "Missing required column 'IssueDate' in credential file: credentials_x.csv",
                "Missing required column 'ExpiryDate' in credential file: credentials_x.csv",
            ]
        );
    }
}
