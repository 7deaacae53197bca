#[cfg(test)]
mod tests {
    use indoc::indoc;
    use stencil_core::{
        Attributes, DefinedAttributeEngine, NoTemplateEngine, TemplateAttributeError,
        TemplateEngine, render_template,
    };

    fn attributes(values: &[(&str, &str)]) -> Attributes {
        values.iter().copied().collect()
    }

    #[test]
    fn substitutes_attributes() {
        let result = DefinedAttributeEngine
            .render(
                "select <columns> from <schema.table> where <col> = :v",
                &attributes(&[
                    ("columns", "id, name"),
                    ("schema.table", "public.users"),
                    ("col", "name"),
                ]),
            )
            .unwrap();
        assert_eq!(result, "select id, name from public.users where name = :v");
    }

    #[test]
    fn leaves_quotes_and_comments() {
        let template = indoc! {"
            select '<a>', \"<a>\" -- <a>
            from t /* <a> */ where x = <a>
        "};
        let result = DefinedAttributeEngine
            .render(template, &attributes(&[("a", "1")]))
            .unwrap();
        assert_eq!(
            result,
            indoc! {"
                select '<a>', \"<a>\" -- <a>
                from t /* <a> */ where x = 1
            "}
        );
    }

    #[test]
    fn comparison_operators_are_literal() {
        let template = "select * from t where a < b and c <> d and e <= f and g<h and <>";
        let result = DefinedAttributeEngine
            .render(template, &Attributes::new())
            .unwrap();
        assert_eq!(result, template);
    }

    #[test]
    fn escaped_bracket() {
        let result = DefinedAttributeEngine
            .render(r"select \<a> and \:b from <t>", &attributes(&[("t", "x")]))
            .unwrap();
        assert_eq!(result, r"select <a> and \:b from x");
    }

    #[test]
    fn undefined_attribute() {
        let error = DefinedAttributeEngine
            .render("select * from <table> where <missing> = 1", &attributes(&[("table", "t")]))
            .unwrap_err();
        let attribute = error.downcast_ref::<TemplateAttributeError>().unwrap();
        assert_eq!(attribute.token, "<missing>");
        assert_eq!(
            attribute.to_string(),
            "Undefined attribute for token '<missing>'"
        );
        assert!(format!("{:#}", error).starts_with("Cannot render the template:"));
    }

    #[test]
    fn render_template_adds_attributes() {
        let error = render_template(
            &DefinedAttributeEngine,
            "select <x>",
            &attributes(&[("y", "1")]),
        )
        .unwrap_err();
        assert!(format!("{:#}", error).starts_with("Using attributes {y:1}"));
    }

    #[test]
    fn no_template_engine() {
        let template = "select <a> from t";
        let result = NoTemplateEngine.render(template, &Attributes::new()).unwrap();
        assert_eq!(result, template);
    }

    #[test]
    fn attributes_table() {
        let mut attributes = Attributes::new();
        attributes.define("b", 2).define("a", "one");
        attributes.extend([("c", 3.5)]);
        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes.get("a"), Some("one"));
        assert_eq!(attributes.get("b"), Some("2"));
        assert!(attributes.contains("c"));
        assert_eq!(attributes.to_string(), "{a:one,b:2,c:3.5}");
        assert_eq!(attributes.remove("a"), Some("one".to_string()));
        assert_eq!(
            attributes.iter().collect::<Vec<_>>(),
            vec![("b", "2"), ("c", "3.5")]
        );
        attributes.define("b", "two");
        assert_eq!(attributes.get("b"), Some("two"));
    }
}
