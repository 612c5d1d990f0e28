/// Name of the cookie carrying the logged-in user's ID
pub const SESSION_COOKIE: &str = "session";

/// Minimum password length, counted in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that satisfy the "special character" password rule
pub const SPECIAL_CHARACTERS: &str = r#"!@#~$%^&*()_+-=[]{};':"\|,.<>/?"#;

/// Where authenticated users land after login
pub const TASKS_PATH: &str = "/tasks";

/// Where the authentication gate sends anonymous users
pub const LOGIN_PATH: &str = "/login";

/// Where logout sends the user
pub const HOME_PATH: &str = "/home";

// =============================================================================
// Error Messages
// =============================================================================

pub const ERR_USERNAME_REQUIRED: &str = "Username is required";

pub const ERR_USERNAME_TAKEN: &str = "Username already taken";

pub const ERR_PASSWORD_MISMATCH: &str = "Passwords do not match";

pub const ERR_USER_NOT_FOUND: &str = "User does not exist";

pub const ERR_INCORRECT_PASSWORD: &str = "Incorrect password";

pub const ERR_EMPTY_TITLE: &str = "Task title cannot be empty";

pub const ERR_INVALID_TASK_ID: &str = "Invalid task ID";

/// Delete does not say whether the task is missing or owned by someone else
pub const ERR_DELETE_FORBIDDEN: &str =
    "Task not found or you do not have permission to delete it";

pub const MSG_REGISTERED: &str = "User registered successfully";
