use trial_match::invocation::InvocationResponse;
use trial_match_cli::run;

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        let envelope = InvocationResponse::<serde_json::Value>::failure(&err);
        match serde_json::to_string(&envelope) {
            Ok(body) => println!("{body}"),
            Err(encode) => eprintln!("unable to encode failure envelope: {encode}"),
        }
        std::process::exit(1);
    }
}
