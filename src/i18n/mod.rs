//! 多语言错误消息模块
//!
//! 使用rat_embed_lang框架提供统一的错误消息多语言支持

use once_cell::sync::Lazy;
use rat_embed_lang::register_translations;
use std::collections::HashMap;

/// 翻译只注册一次，首次查找消息时自动触发
static REGISTERED: Lazy<()> = Lazy::new(ErrorMessageI18n::register_all_translations);

/// 错误消息翻译注册器
pub struct ErrorMessageI18n;

impl ErrorMessageI18n {
    fn entry(
        translations: &mut HashMap<String, HashMap<String, String>>,
        key: &str,
        zh: &str,
        en: &str,
    ) {
        let mut messages = HashMap::new();
        messages.insert("zh-CN".to_string(), zh.to_string());
        messages.insert("en-US".to_string(), en.to_string());
        translations.insert(key.to_string(), messages);
    }

    /// 注册所有错误消息翻译
    pub fn register_all_translations() {
        let mut translations = HashMap::new();

        // 错误类别前缀
        Self::entry(&mut translations, "error.kind.schema", "模式错误", "schema error");
        Self::entry(&mut translations, "error.kind.table_not_exist", "表不存在", "table does not exist");
        Self::entry(&mut translations, "error.kind.type", "类型错误", "type error");
        Self::entry(&mut translations, "error.kind.value", "参数错误", "value error");
        Self::entry(&mut translations, "error.kind.connection", "连接错误", "connection error");
        Self::entry(&mut translations, "error.kind.config", "配置错误", "configuration error");

        // 模式反射
        Self::entry(
            &mut translations,
            "error.multiple_primary_keys",
            "存在多个主键列: {columns}",
            "more than one primary key: {columns}",
        );

        // 建表
        Self::entry(
            &mut translations,
            "error.invalid_column_type",
            "无效的数据类型: {type_name}",
            "invalid data type: {type_name}",
        );
        Self::entry(
            &mut translations,
            "error.primary_key_type",
            "主键列 '{column}' 的数据类型无效: {type_name}",
            "invalid data type for primary key '{column}': {type_name}",
        );
        Self::entry(
            &mut translations,
            "error.primary_key_missing",
            "主键列 '{column}' 不在列定义中",
            "primary key column '{column}' is not among the column definitions",
        );
        Self::entry(
            &mut translations,
            "error.table_no_columns",
            "表至少需要一列",
            "Table must have at least one column",
        );
        Self::entry(
            &mut translations,
            "error.column_name_duplicate",
            "列名 '{name}' 重复",
            "Column name '{name}' is duplicated",
        );

        // 插入
        Self::entry(
            &mut translations,
            "error.insert_arity",
            "期望 {expected} 个值，实际得到 {actual} 个",
            "expected {expected} values, got {actual}",
        );

        // 查询与索引
        Self::entry(
            &mut translations,
            "error.no_primary_key",
            "表 '{table}' 没有主键列",
            "table '{table}' has no primary key column",
        );
        Self::entry(
            &mut translations,
            "error.slice_step",
            "不支持步长为 {step} 的切片",
            "cannot handle step size {step}",
        );
        Self::entry(
            &mut translations,
            "error.invalid_key",
            "无效的索引键: {key}",
            "invalid key: {key}",
        );
        Self::entry(
            &mut translations,
            "error.empty_column_selection",
            "列选择不能为空",
            "column selection must not be empty",
        );

        // 标识符校验
        Self::entry(
            &mut translations,
            "error.identifier_empty",
            "{kind}不能为空",
            "{kind} must not be empty",
        );
        Self::entry(
            &mut translations,
            "error.identifier_too_long",
            "{kind} '{name}' 长度不能超过64个字符",
            "{kind} '{name}' must not exceed 64 characters",
        );
        Self::entry(
            &mut translations,
            "error.identifier_invalid",
            "{kind} '{name}' 只能包含字母、数字和下划线，且不能以数字开头",
            "{kind} '{name}' may only contain letters, digits and underscores and must not start with a digit",
        );
        Self::entry(
            &mut translations,
            "error.identifier_keyword",
            "{kind}不能使用SQL关键字: {name}",
            "{kind} must not be an SQL keyword: {name}",
        );

        Self::entry(
            &mut translations,
            "error.identifier_control",
            "{kind} '{name}' 不能包含控制字符",
            "{kind} '{name}' must not contain control characters",
        );

        // 存储层
        Self::entry(
            &mut translations,
            "error.query",
            "SQL执行失败 [{sql}]",
            "SQL execution failed [{sql}]",
        );
        Self::entry(
            &mut translations,
            "error.sqlite_connection",
            "SQLite连接失败: {message}",
            "SQLite connection failed: {message}",
        );
        Self::entry(
            &mut translations,
            "error.sqlite_file_not_found",
            "SQLite数据库文件不存在且未启用自动创建: {path}",
            "SQLite database file does not exist and auto-create is not enabled: {path}",
        );

        // 配置
        Self::entry(
            &mut translations,
            "error.config_path_empty",
            "数据库路径不能为空",
            "database path must not be empty",
        );
        Self::entry(
            &mut translations,
            "error.config_memory_unsupported",
            "每次操作都会打开新连接，不支持内存数据库: {path}",
            "in-memory databases are not supported because every operation opens a new connection: {path}",
        );
        Self::entry(
            &mut translations,
            "error.config_field_missing",
            "必须显式设置配置项: {field}",
            "configuration field must be set explicitly: {field}",
        );
        Self::entry(
            &mut translations,
            "error.config_parse",
            "配置解析失败: {message}",
            "failed to parse configuration: {message}",
        );

        register_translations(translations);
    }

    /// 初始化错误消息多语言支持
    ///
    /// 语言取自 `RAT_LANG` 环境变量，未设置时使用 en-US
    pub fn init() {
        Lazy::force(&REGISTERED);

        let lang = std::env::var("RAT_LANG").unwrap_or_else(|_| "en-US".to_string());

        use rat_embed_lang::normalize_language_code;
        let normalized_lang = normalize_language_code(&lang);
        set_language(&normalized_lang);
    }
}

/// 查找翻译消息
pub fn t(key: &str) -> String {
    Lazy::force(&REGISTERED);
    rat_embed_lang::t(key)
}

/// 查找翻译消息并替换 `{name}` 占位符
pub fn tf(key: &str, args: &[(&str, &str)]) -> String {
    Lazy::force(&REGISTERED);
    rat_embed_lang::tf(key, args)
}

pub use rat_embed_lang::{current_language, set_language};
