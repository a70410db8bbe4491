coupler::clap!(gainpan::GainPan);
