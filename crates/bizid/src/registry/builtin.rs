use super::BusinessType;

impl BusinessType {
    // Core entities (0x001..=0x0FF)

    pub const TENANT: Self = Self::new(0x001, "TENANT", "Tenant", "tenants", 1);
    pub const USER: Self = Self::new(0x002, "USER", "User account", "users", 1);
    pub const PROJECT: Self = Self::new(0x003, "PROJECT", "Project", "projects", 1);
    pub const APP_SPEC: Self = Self::new(0x004, "APP_SPEC", "Application spec", "app_specs", 1);
    pub const APP_SPEC_VERSION: Self = Self::new(
        0x005,
        "APP_SPEC_VERSION",
        "Application spec version",
        "app_spec_versions",
        1,
    );
    pub const GENERATED_CODE: Self =
        Self::new(0x006, "GENERATED_CODE", "Generated code", "generated_code", 1);
    pub const FORK: Self = Self::new(0x007, "FORK", "Project fork", "forks", 1);
    pub const SOCIAL_INTERACTION: Self = Self::new(
        0x008,
        "SOCIAL_INTERACTION",
        "Social interaction",
        "social_interactions",
        1,
    );
    pub const MAGIC_PROMPT: Self =
        Self::new(0x009, "MAGIC_PROMPT", "Magic prompt", "magic_prompts", 1);
    pub const AGENT_EXECUTION: Self = Self::new(
        0x00A,
        "AGENT_EXECUTION",
        "Agent execution record",
        "agent_executions",
        1,
    );
    pub const USER_SESSION: Self =
        Self::new(0x00B, "USER_SESSION", "User session", "user_sessions", 1);
    pub const SYSTEM_CONFIG: Self =
        Self::new(0x00C, "SYSTEM_CONFIG", "System configuration", "system_configs", 1);
    pub const OPERATION_LOG: Self =
        Self::new(0x00D, "OPERATION_LOG", "Operation log", "operation_logs", 1);

    // Extended entities (0x100..=0x1FF)

    pub const AUDIT_LOG: Self = Self::new(0x100, "AUDIT_LOG", "System audit log", "audit_logs", 1);
    pub const NOTIFICATION: Self =
        Self::new(0x101, "NOTIFICATION", "Notification message", "notifications", 1);
    pub const ATTACHMENT: Self =
        Self::new(0x102, "ATTACHMENT", "File attachment", "attachments", 1);

    /// Every built-in business type, in ascending code order.
    pub const BUILTIN: [Self; 16] = [
        Self::TENANT,
        Self::USER,
        Self::PROJECT,
        Self::APP_SPEC,
        Self::APP_SPEC_VERSION,
        Self::GENERATED_CODE,
        Self::FORK,
        Self::SOCIAL_INTERACTION,
        Self::MAGIC_PROMPT,
        Self::AGENT_EXECUTION,
        Self::USER_SESSION,
        Self::SYSTEM_CONFIG,
        Self::OPERATION_LOG,
        Self::AUDIT_LOG,
        Self::NOTIFICATION,
        Self::ATTACHMENT,
    ];
}

const _: () = {
    // Compile-time check: the built-in table is in range, versioned, and
    // strictly ascending (which also rules out duplicate codes).
    let table = &BusinessType::BUILTIN;
    let mut i = 0;
    while i < table.len() {
        assert!(table[i].validate().is_ok(), "invalid built-in business type");
        assert!(table[i].code() != 0, "code 0x000 is reserved");
        if i > 0 {
            assert!(
                table[i - 1].code() < table[i].code(),
                "built-in business types must be unique and sorted by code"
            );
        }
        i += 1;
    }
};
