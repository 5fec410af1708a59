// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

#[cfg(test)]
mod validator_tests {
    //! # 字段校验性质测试
    //!
    //! 用 proptest 生成随机输入，检查校验结果只取决于去除首尾空白后的字符数，
    //! 以及可选字段留空总是通过。

    use proptest::prelude::*;

    use project_gallery::{
        util::truncate,
        validate_field, Validation,
    };

    proptest! {
        #[test]
        fn title_length_decides_validity(title in "[a-zA-Z0-9 ]{0,120}") {
            let length = title.trim().chars().count();
            let result = validate_field("title", &title);
            prop_assert_eq!(result.is_valid, (3..=100).contains(&length));
        }

        #[test]
        fn surrounding_whitespace_is_ignored(
            body in "[a-z]{1,50}",
            left in " {0,5}",
            right in "[ \t]{0,5}",
        ) {
            let padded = format!("{}{}{}", left, body, right);
            for field in ["title", "team", "description", "email", "link"] {
                prop_assert_eq!(validate_field(field, &padded), validate_field(field, &body));
            }
        }

        #[test]
        fn empty_optional_link_is_valid(spaces in "[ \t]{0,10}") {
            prop_assert_eq!(validate_field("link", &spaces), Validation::valid());
        }

        #[test]
        fn multibyte_description_counts_chars(n in 0usize..20) {
            let description = "é".repeat(n);
            prop_assert_eq!(validate_field("description", &description).is_valid, n >= 10);
        }

        #[test]
        fn truncate_never_exceeds_limit(text in ".{0,300}", max in 1usize..200) {
            let out = truncate(&text, max);
            prop_assert!(out.chars().count() <= max + 3);
        }
    }

    #[test]
    fn test_required_messages() {
        assert_eq!(validate_field("title", "  ").message, "Title is required");
        assert_eq!(validate_field("team", "").message, "Team is required");
        assert_eq!(validate_field("email", "").message, "Email is required");
    }
}
