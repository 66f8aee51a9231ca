use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeFieldType {
    Text,
    Number,
    Address,
    Phone,
    Date,
    Url,
    Imageurl,
    Radio,
    Dropdown,
    Birthday,
    Zip,
}

/// Body for creating a merge field on a list.
#[derive(Clone, Debug, Serialize)]
pub struct NewMergeField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: MergeFieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl NewMergeField {
    pub fn new(name: impl Into<String>, field_type: MergeFieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            tag: None,
            required: None,
            default_value: None,
            public: None,
            help_text: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

/// Partial update of an existing merge field; unset fields are left untouched.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MergeFieldUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}
