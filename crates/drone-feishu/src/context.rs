//! Build metadata exported by the Drone runner.

/// Fields read from `DRONE_*` variables. Empty strings mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildContext {
    pub repo_name: String,
    pub repo_link: String,
    pub build_status: String,
    pub build_number: String,
    pub build_link: String,
    pub failed_steps: String,
    pub branch: String,
    pub tag: String,
    pub author: String,
    pub author_name: String,
    pub author_email: String,
    pub commit_sha: String,
    pub commit_link: String,
    pub commit_message: String,
}

impl BuildContext {
    /// Read the context from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the context through `lookup`; unset keys become empty strings.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();
        Self {
            repo_name: get("DRONE_REPO_NAME"),
            repo_link: get("DRONE_REPO_LINK"),
            build_status: get("DRONE_BUILD_STATUS"),
            build_number: get("DRONE_BUILD_NUMBER"),
            build_link: get("DRONE_BUILD_LINK"),
            failed_steps: get("DRONE_FAILED_STEPS"),
            branch: get("DRONE_REPO_BRANCH"),
            tag: get("DRONE_TAG"),
            author: get("DRONE_COMMIT_AUTHOR"),
            author_name: get("DRONE_COMMIT_AUTHOR_NAME"),
            author_email: get("DRONE_COMMIT_AUTHOR_EMAIL"),
            commit_sha: get("DRONE_COMMIT_SHA"),
            commit_link: get("DRONE_COMMIT_LINK"),
            commit_message: get("DRONE_COMMIT_MESSAGE"),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.build_status == "success"
    }
}
