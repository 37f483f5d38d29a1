use kaleid::{CharClass, ParseConfig, Parser, class, literal, pattern, recursive};

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Number(f64),
    Variable(String),
    Binary(char, Box<Expr>, Box<Expr>),
    Call(String, Vec<Expr>),
}

fn token(text: &str) -> Parser<()> {
    literal(text).ignore().skipping_whitespace()
}

fn fold(first: Expr, rest: Vec<(char, Expr)>) -> Expr {
    rest.into_iter().fold(first, |lhs, (op, rhs)| {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    })
}

fn operator(ops: &str) -> Parser<char> {
    class(CharClass::chars(ops))
        .map(|text| text.chars().next().unwrap_or_default())
        .skipping_whitespace()
}

/// ```text
/// expr    = term (("+" | "-") term)*
/// term    = factor (("*" | "/") factor)*
/// factor  = number | call | variable | "(" expr ")"
/// call    = ident "(" (expr ("," expr)*)? ")"
/// ```
fn expr() -> Parser<Expr> {
    recursive(|expr| {
        let number = pattern(r"[0-9]+(\.[0-9]+)?")
            .expect("valid number pattern")
            .map(|text| Expr::Number(text.parse().unwrap_or_default()))
            .skipping_whitespace()
            .label("number");
        let ident = pattern("[a-z][a-z0-9]*")
            .expect("valid identifier pattern")
            .parser()
            .skipping_whitespace();

        let args = expr
            .clone()
            .then(token(",").skip_left(expr.clone()).zero_or_more())
            .map(|(first, mut rest)| {
                rest.insert(0, first);
                rest
            })
            .optional()
            .map(Option::unwrap_or_default);
        let call = ident
            .clone()
            .skip(token("("))
            .then(args)
            .skip(token(")"))
            .map(|(name, args)| Expr::Call(name, args));
        let variable = ident.map(Expr::Variable);
        let parens = token("(").skip_left(expr).skip(token(")"));

        let factor = number.or(call).or(variable).or(parens);
        let term = factor
            .clone()
            .then(operator("*/").then(factor).zero_or_more())
            .map(|(first, rest)| fold(first, rest));
        term.clone()
            .then(operator("+-").then(term).zero_or_more())
            .map(|(first, rest)| fold(first, rest))
    })
}

fn eval(expr: &Expr) -> f64 {
    match expr {
        Expr::Number(n) => *n,
        Expr::Variable(_) | Expr::Call(..) => f64::NAN,
        Expr::Binary(op, lhs, rhs) => {
            let (lhs, rhs) = (eval(lhs), eval(rhs));
            match op {
                '+' => lhs + rhs,
                '-' => lhs - rhs,
                '*' => lhs * rhs,
                _ => lhs / rhs,
            }
        }
    }
}

fn config() -> ParseConfig {
    ParseConfig::new().whitespace(class(CharClass::whitespace()).repeated().ignore())
}

fn parse(source: &str) -> Expr {
    expr().parse_to_end_with(source, &config()).unwrap()
}

#[test]
fn precedence_and_associativity() {
    assert_eq!(eval(&parse("5-2")), 3.0);
    assert_eq!(eval(&parse("10 - 4 - 3")), 3.0);
    assert_eq!(eval(&parse("2 + 3 * 4")), 14.0);
    assert_eq!(eval(&parse("(2 + 3) * 4")), 20.0);
    assert_eq!(eval(&parse("8 / 2 / 2")), 2.0);
}

#[test]
fn deep_nesting() {
    let source = format!("{}1{}", "(".repeat(16), ")".repeat(16));
    assert_eq!(parse(&source), Expr::Number(1.0));
}

#[test]
fn call_backtracks_to_variable() {
    assert_eq!(parse("x"), Expr::Variable("x".to_string()));
    assert_eq!(
        parse("foo(1, y)"),
        Expr::Call(
            "foo".to_string(),
            vec![Expr::Number(1.0), Expr::Variable("y".to_string())]
        )
    );
    assert_eq!(parse("f()"), Expr::Call("f".to_string(), Vec::new()));
}

#[test]
fn nested_calls() {
    let parsed = parse("f(g(1) + 2)");
    let Expr::Call(name, args) = parsed else {
        panic!("expected a call");
    };
    assert_eq!(name, "f");
    assert!(matches!(&args[0], Expr::Binary('+', lhs, _) if matches!(**lhs, Expr::Call(..))));
}

#[test]
fn unbalanced_parens_report_closing() {
    let err = expr()
        .parse_to_end_with("(1 + 2", &config())
        .unwrap_err();
    assert_eq!(err.offset, 6);
    assert!(err.expected.contains(&r#"^")""#.to_string()));
}

#[test]
fn missing_operand_reports_label() {
    let err = expr().parse_to_end_with("1 +", &config()).unwrap_err();
    assert_eq!(err.offset, 3);
    assert!(err.expected.contains(&"number".to_string()));
    assert_eq!(err.expected_whitespace, vec!["[:whitespace:]+"]);
}

#[test]
fn expected_set_survives_recursion() {
    let grammar = expr();
    let descriptions = grammar.expected().descriptions();
    assert_eq!(descriptions[0], "number");
    assert!(grammar.expected().skips_whitespace());
}

#[test]
fn recursive_grammar_can_be_dropped_and_rebuilt() {
    for _ in 0..3 {
        let grammar = expr();
        assert!(grammar.parse_to_end_with("1+1", &config()).is_ok());
    }
}
