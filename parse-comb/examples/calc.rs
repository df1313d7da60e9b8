use parse_comb::*;

fn padded(parser: Parser<i32>) -> Parser<i32> {
    whitespace()
        .ignore_then(parser)
        .then_ignore(whitespace())
        .boxed()
}

fn parser() -> Recursive<i32> {
    let expr = Recursive::declare();
    let add_expr = Recursive::declare();
    let mul_expr = Recursive::declare();

    let digit = choice("0123456789".chars().map(|c| literal(c.to_string())));

    let num = digit
        .at_least_one()
        .try_map(|digits| {
            digits
                .concat()
                .parse::<i32>()
                .map_err(|err| Error::new(err.to_string()))
        })
        .named("num");

    let term = num
        .or(literal("(")
            .ignore_then(padded(expr.reference().boxed()))
            .then_ignore(literal(")")))
        .boxed();

    expr.define(add_expr.clone());

    add_expr.define(choice([
        padded(mul_expr.reference().boxed())
            .then_ignore(literal("+"))
            .then(padded(add_expr.reference().boxed()))
            .map(|(lhs, rhs)| lhs + rhs)
            .boxed(),
        padded(mul_expr.reference().boxed())
            .then_ignore(literal("-"))
            .then(padded(add_expr.reference().boxed()))
            .map(|(lhs, rhs)| lhs - rhs)
            .boxed(),
        mul_expr.clone().boxed(),
    ]));

    mul_expr.define(choice([
        padded(term.clone())
            .then_ignore(literal("*"))
            .then(padded(mul_expr.reference().boxed()))
            .map(|(lhs, rhs)| lhs * rhs)
            .boxed(),
        padded(term.clone())
            .then_ignore(literal("/"))
            .then(padded(mul_expr.reference().boxed()))
            .map(|(lhs, rhs)| lhs / rhs)
            .boxed(),
        term,
    ]));

    expr
}

fn main() {
    env_logger::init();

    let input = "11+2*(3+4)/5";

    match parser().parse_all(input) {
        Ok(result) => {
            println!("parser: {}", result);
            assert_eq!(result, 13);
        }
        Err(err) => eprintln!("error: {err}"),
    }
}
