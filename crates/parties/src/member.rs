use serde::{Deserialize, Serialize};

use retailops_core::validate::{Validate, optional_non_empty, require_non_empty};
use retailops_core::{DomainError, DomainResult, MemberId, Page};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub points: i64,
}

retailops_core::impl_entity!(Member, MemberId);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(flatten)]
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMember {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

fn check_phone(phone: Option<&str>) -> DomainResult<()> {
    match phone {
        Some(p) if !p.chars().all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ') => {
            Err(DomainError::validation("phone may only contain digits, '+', '-' and spaces"))
        }
        _ => Ok(()),
    }
}

impl Validate for CreateMember {
    fn validate(&self) -> DomainResult<()> {
        require_non_empty("name", &self.name)?;
        check_phone(self.phone.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Validate for UpdateMember {
    fn validate(&self) -> DomainResult<()> {
        optional_non_empty("name", self.name.as_deref())?;
        check_phone(self.phone.as_deref())
    }
}

retailops_core::impl_page_filter!(MemberFilter);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_phone_must_be_numeric() {
        let dto = CreateMember {
            name: "Budi".to_string(),
            phone: Some("0812-3456 789".to_string()),
            address: None,
        };
        assert!(dto.validate().is_ok());

        let dto = CreateMember {
            phone: Some("call me".to_string()),
            ..dto
        };
        assert!(dto.validate().is_err());
    }
}
