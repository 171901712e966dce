use std::path::Path;

/// Type token for solution folders
pub const FOLDER_TYPE_GUID: &str = "{2150E333-8FDC-42A3-9474-1A3956D46DE8}";

/// Kinds of project the solution format has a type token for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    CSharp,
    VisualBasic,
    FSharp,
    Cpp,
}

impl ProjectType {
    /// Select the project type from the file extension, ignoring case
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csproj" => Some(ProjectType::CSharp),
            "vbproj" => Some(ProjectType::VisualBasic),
            "fsproj" => Some(ProjectType::FSharp),
            "vcxproj" => Some(ProjectType::Cpp),
            _ => None,
        }
    }

    pub fn type_guid(&self) -> &'static str {
        match self {
            ProjectType::CSharp => "{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}",
            ProjectType::VisualBasic => "{F184B08F-C81C-45F6-A57F-5ABD9991F28F}",
            ProjectType::FSharp => "{F2A71F9B-5D33-465A-A702-920D77279786}",
            ProjectType::Cpp => "{8BC9CEB8-8B4A-11D0-8D11-00A0C91BC942}",
        }
    }
}
