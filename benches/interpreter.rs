use criterion::{Criterion, black_box, criterion_group, criterion_main};

use lume::interpreter::{self, env::Environment};
use lume::{lexer, parser};

const FIB: &str = "
let fib = fn(n) {
    if (n < 2) {
        n
    } else {
        fib(n - 1) + fib(n - 2)
    }
};
fib(15)
";

const ARRAY_SUM: &str = "
let reduce = fn(arr, initial, f) {
    let iter = fn(arr, result) {
        if (len(arr) == 0) {
            result
        } else {
            iter(rest(arr), f(result, first(arr)));
        }
    };
    iter(arr, initial);
};
reduce([1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 0, fn(a, b) { a + b })
";

fn bench_workload(c: &mut Criterion, label: &str, source: &str) {
    c.bench_function(&format!("lex_{label}"), |b| {
        b.iter(|| black_box(lexer::tokenize(black_box(source))))
    });

    c.bench_function(&format!("parse_{label}"), |b| {
        b.iter(|| black_box(parser::parse(black_box(source))))
    });

    let (program, errors) = parser::parse(source);
    assert!(errors.is_empty(), "parser errors: {errors:?}");
    c.bench_function(&format!("eval_{label}"), |b| {
        b.iter(|| {
            let env = Environment::new();
            black_box(interpreter::eval_program(black_box(&program), &env))
        })
    });

    c.bench_function(&format!("full_pipeline_{label}"), |b| {
        b.iter(|| {
            let (program, errors) = parser::parse(black_box(source));
            assert!(errors.is_empty());
            let env = Environment::new();
            black_box(interpreter::eval_program(&program, &env))
        })
    });
}

fn bench_interpreter(c: &mut Criterion) {
    bench_workload(c, "fib", FIB);
    bench_workload(c, "array_sum", ARRAY_SUM);
}

criterion_group!(benches, bench_interpreter);
criterion_main!(benches);
